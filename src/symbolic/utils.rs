
// the collection of utility functions for grid generation and for checking
// analytical derivatives against finite differences

/// Evenly spaced values over [start, end], endpoints included.
pub fn linspace(start: f64, end: f64, num_values: usize) -> Vec<f64> {
    let mut values = Vec::with_capacity(num_values);
    let step = (end - start) / (num_values as f64 - 1.0);
    for i in 0..num_values {
        values.push(start + (i as f64 * step));
    }
    values
}

/// Central-difference derivative of a 1D function at each of x_values.
pub fn numerical_derivative<F>(f: F, x_values: &[f64], h: f64) -> Vec<f64>
where
    F: Fn(f64) -> f64,
{
    let mut derivatives = Vec::with_capacity(x_values.len());
    for &x in x_values {
        derivatives.push((f(x + h) - f(x - h)) / (2.0 * h));
    }
    derivatives
}

/// Central-difference gradient of a multivariable function at one point:
/// component i perturbs coordinate i only.
pub fn numerical_derivative_multi<F>(f: F, point: &[f64], h: f64) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let mut derivatives = Vec::with_capacity(point.len());
    for i in 0..point.len() {
        let mut plus = point.to_vec();
        let mut minus = point.to_vec();
        plus[i] += h;
        minus[i] -= h;
        derivatives.push((f(&plus) - f(&minus)) / (2.0 * h));
    }
    derivatives
}

/// Length-normalized distance of two sample vectors.
pub fn norm(x: &[f64], y: &[f64]) -> f64 {
    assert_eq!(x.len(), y.len());
    (1.0 / x.len() as f64)
        * x.iter()
            .zip(y.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linspace_endpoints_and_step() {
        let values = linspace(0.0, 1.0, 5);
        assert_eq!(values.len(), 5);
        assert_relative_eq!(values[0], 0.0);
        assert_relative_eq!(values[4], 1.0);
        assert_relative_eq!(values[1], 0.25);
    }

    #[test]
    fn test_numerical_derivative_of_square() {
        let d = numerical_derivative(|x| x * x, &[1.0, 2.0], 1e-5);
        assert_relative_eq!(d[0], 2.0, epsilon = 1e-6);
        assert_relative_eq!(d[1], 4.0, epsilon = 1e-6);
    }

    #[test]
    fn test_numerical_gradient() {
        let grad = numerical_derivative_multi(|p| p[0] * p[1], &[3.0, 5.0], 1e-5);
        assert_relative_eq!(grad[0], 5.0, epsilon = 1e-6);
        assert_relative_eq!(grad[1], 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_norm_of_identical_vectors_is_zero() {
        assert_relative_eq!(norm(&[1.0, 2.0], &[1.0, 2.0]), 0.0);
    }
}
