use num_complex::Complex64;

/// The quadrant of the complex plane a function value lies in.
///
/// The boundary conventions are load-bearing: the argument-principle
/// evaluator counts quadrant jumps along region contours, and moving a
/// boundary from `>` to `>=` can spuriously raise the jump across an
/// axis-crossing edge to 2 and destabilise refinement.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    First = 1,
    Second = 2,
    Third = 3,
    Fourth = 4,
}

impl Quadrant {
    /// Classifies a function value.
    ///
    /// The chain is total: anything the first three branches do not cover,
    /// including the origin and non-finite values (a caller error per the
    /// function contract), falls through to [`Quadrant::Fourth`]. The
    /// comparisons must stay exactly as written.
    pub fn of(w: Complex64) -> Quadrant {
        if w.re > 0.0 && w.im >= 0.0 {
            Quadrant::First
        } else if w.re <= 0.0 && w.im > 0.0 {
            Quadrant::Second
        } else if w.re < 0.0 && w.im <= 0.0 {
            Quadrant::Third
        } else {
            Quadrant::Fourth
        }
    }
}

/// `(a - b) mod 4`. A value of 2 marks the endpoints as diagonally opposite,
/// the necessary condition for a root or pole near the edge. Mod-4
/// subtraction makes the test symmetric in its endpoints, so edges need no
/// canonical orientation here.
pub fn phase_difference(a: Quadrant, b: Quadrant) -> u8 {
    (a as i8 - b as i8).rem_euclid(4) as u8
}

#[cfg(test)]
impl quickcheck::Arbitrary for Quadrant {
    fn arbitrary(g: &mut quickcheck::Gen) -> Quadrant {
        *g.choose(&[
            Quadrant::First,
            Quadrant::Second,
            Quadrant::Third,
            Quadrant::Fourth,
        ])
        .unwrap()
    }
}
