// small numeric helpers shared by the symbolic layer and the solvers

pub fn linspace(start: f64, end: f64, num_values: usize) -> Vec<f64> {
    if num_values == 1 {
        return vec![start];
    }
    let step = (end - start) / (num_values as f64 - 1.0);
    (0..num_values).map(|i| start + i as f64 * step).collect()
}

/// Central difference (f(x+h) - f(x-h)) / 2h of a fallible function.
pub fn central_difference<F, E>(f: &F, x: f64, h: f64) -> Result<f64, E>
where
    F: Fn(f64) -> Result<f64, E> + ?Sized,
{
    let f_x_plus_h = f(x + h)?;
    let f_x_minus_h = f(x - h)?;
    Ok((f_x_plus_h - f_x_minus_h) / (2.0 * h))
}

/*
    let x_values = vec![0.0, 1.0, 2.0, 3.0, 4.0];
    let h = 0.001;
    let derivatives = numerical_derivative(&f, &x_values, h)?;
*/
pub fn numerical_derivative<F, E>(f: &F, x_values: &[f64], h: f64) -> Result<Vec<f64>, E>
where
    F: Fn(f64) -> Result<f64, E> + ?Sized,
{
    x_values
        .iter()
        .map(|&x| central_difference(f, x, h))
        .collect()
}

// compute norm of two vectors
pub fn norm(x: &[f64], y: &[f64]) -> f64 {
    assert_eq!(x.len(), y.len());
    (1.0 / x.len() as f64)
        * x.iter()
            .zip(y.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt()
}
