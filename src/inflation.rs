//! Inflation adjustment of nominal amounts

/// Value of `nominal` in today's money after `years` of inflation
///
/// `annual_inflation_percent` is in percent (2.0 = 2%).
pub fn real_value(nominal: f64, years: u32, annual_inflation_percent: f64) -> f64 {
    if annual_inflation_percent == 0.0 || years == 0 {
        return nominal;
    }
    let inflation_factor = (1.0 + annual_inflation_percent / 100.0).powi(years as i32);
    nominal / inflation_factor
}

/// Purchasing power today of an amount received in `years`
pub fn present_value(future_value: f64, years: u32, inflation_percent: f64) -> f64 {
    real_value(future_value, years, inflation_percent)
}

/// Purchasing power lost to inflation
pub fn inflation_loss(nominal: f64, years: u32, inflation_percent: f64) -> f64 {
    nominal - real_value(nominal, years, inflation_percent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_no_adjustment_cases() {
        assert_eq!(real_value(100_000.0, 0, 2.0), 100_000.0);
        assert_eq!(real_value(100_000.0, 10, 0.0), 100_000.0);
    }

    #[test]
    fn test_real_value() {
        assert_relative_eq!(real_value(110_250.0, 2, 5.0), 100_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_real_value_decreases_with_time() {
        let values: Vec<f64> = (0..40).map(|y| real_value(1_000_000.0, y, 2.0)).collect();
        assert!(values.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_inflation_loss() {
        let loss = inflation_loss(110_250.0, 2, 5.0);
        assert_relative_eq!(loss, 10_250.0, max_relative = 1e-9);
        assert_eq!(present_value(500.0, 3, 0.0), 500.0);
    }
}
