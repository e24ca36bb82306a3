use std::{fmt::Display, str::FromStr};

use crate::Error;

/// A monthly commission target. Always a finite, positive amount.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct CommissionGoal(f64);

impl CommissionGoal {
    /// Create a goal from `value`.
    ///
    /// # Errors
    /// Returns [Error::InvalidGoal] if `value` is zero, negative or not finite.
    pub fn new(value: f64) -> Result<Self, Error> {
        if !value.is_finite() || value <= 0.0 {
            return Err(Error::InvalidGoal);
        }

        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl FromStr for CommissionGoal {
    type Err = Error;

    /// Accepts either a dot or a comma as the decimal separator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .replace(',', ".")
            .parse()
            .map_err(|_| Error::InvalidGoal)?;

        Self::new(value)
    }
}

impl Display for CommissionGoal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The percentage of `goal` reached by `current_total`, capped at 100.
///
/// Returns 0 when `goal` is not positive.
pub fn get_progress(current_total: f64, goal: f64) -> f64 {
    if goal.is_nan() || goal <= 0.0 {
        return 0.0;
    }

    (current_total / goal * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use crate::Error;

    use super::{CommissionGoal, get_progress};

    #[test]
    fn progress_is_zero_without_a_positive_goal() {
        assert_eq!(get_progress(100.0, 0.0), 0.0);
        assert_eq!(get_progress(100.0, -10.0), 0.0);
        assert_eq!(get_progress(100.0, f64::NAN), 0.0);
    }

    #[test]
    fn progress_is_linear_below_goal() {
        assert_eq!(get_progress(2500.0, 5000.0), 50.0);
        assert_eq!(get_progress(0.0, 5000.0), 0.0);
        assert_eq!(get_progress(1250.0, 5000.0), 25.0);
    }

    #[test]
    fn progress_is_capped_at_one_hundred() {
        assert_eq!(get_progress(6000.0, 5000.0), 100.0);
        assert_eq!(get_progress(5000.0, 5000.0), 100.0);
    }

    #[test]
    fn goal_must_be_positive_and_finite() {
        for value in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert_eq!(CommissionGoal::new(value), Err(Error::InvalidGoal), "{value}");
        }
        assert_eq!(CommissionGoal::new(5000.0).unwrap().value(), 5000.0);
    }

    #[test]
    fn parses_goal_with_either_decimal_separator() {
        assert_eq!(
            "1500,50".parse::<CommissionGoal>().unwrap().value(),
            1500.5
        );
        assert_eq!(
            " 1500.50 ".parse::<CommissionGoal>().unwrap().value(),
            1500.5
        );
        assert_eq!("abc".parse::<CommissionGoal>(), Err(Error::InvalidGoal));
        assert_eq!("".parse::<CommissionGoal>(), Err(Error::InvalidGoal));
        assert_eq!("0".parse::<CommissionGoal>(), Err(Error::InvalidGoal));
    }
}
