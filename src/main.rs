use grpf::{grpf, rectangular_domain, GrpfParams};
use num_complex::Complex64;

fn main() {
    // (z - 1)(z - i)^2 (z + 1)^3 / (z + i): three zeros and one pole.
    let f = |z: Complex64| {
        let i = Complex64::new(0.0, 1.0);
        (z - 1.0) * (z - i).powi(2) * (z + 1.0).powi(3) / (z + i)
    };
    let mesh = rectangular_domain(Complex64::new(-2.0, -2.0), Complex64::new(2.0, 2.0), 0.1);
    match grpf(f, &mesh, &GrpfParams::default()) {
        Ok((zeros, poles)) => {
            for z in zeros {
                println!("zero: {z}");
            }
            for p in poles {
                println!("pole: {p}");
            }
        }
        Err(err) => eprintln!("grpf failed: {err}"),
    }
}
