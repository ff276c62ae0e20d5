use super::Tape;
use crate::array::{Array, Shape};
use crate::error::WengertError;
use crate::ops::traits::Scalar;
use crate::tensor::Tensor;
use approx::relative_eq;
use log::debug;
use num_traits::{cast, ToPrimitive};
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}, element {element_index}: analytical {analytical_grad:?} != numerical {numerical_grad:?} (difference {difference:?})")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Function output has shape {shape:?} on a tape that is not elementwise-only; reduce it to 1x1 first")]
    NonScalarOutput { shape: Shape },
    #[error("Numerical gradient is NaN or infinite for input {input_index}, element {element_index}. Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Analytical gradient is NaN or infinite for input {input_index}, element {element_index}. Value: {value:?}")]
    AnalyticalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        value: f64,
    },
    #[error("Analytical gradient for input {input_index} has shape {actual:?}, expected {expected:?}")]
    MissingAnalyticalGrad {
        input_index: usize,
        expected: Shape,
        actual: Shape,
    },
    #[error("Value {0} cannot be represented in the tape's scalar type")]
    ConversionError(f64),
    #[error("Tensor error during gradient check: {0}")]
    TensorError(WengertError),
}

// Map WengertError to GradCheckError::TensorError
impl From<WengertError> for GradCheckError {
    fn from(err: WengertError) -> Self {
        GradCheckError::TensorError(err)
    }
}

/// Finite-difference settings for [`check_grad`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradCheckConfig {
    /// Half-width of the central difference.
    pub epsilon: f64,
    /// Accepted absolute and relative difference.
    pub tolerance: f64,
}

impl Default for GradCheckConfig {
    fn default() -> Self {
        GradCheckConfig {
            epsilon: 1e-6,
            tolerance: 1e-5,
        }
    }
}

fn to_f64<T: Scalar>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Records `func` on a fresh tape with one leaf per input.
fn evaluate<T, F>(func: &F, inputs: &[Array<T>]) -> Result<(Tape<T>, Vec<Tensor<T>>, Tensor<T>), GradCheckError>
where
    T: Scalar,
    F: Fn(&Tape<T>, &[Tensor<T>]) -> Result<Tensor<T>, WengertError>,
{
    let tape = Tape::new();
    let leaves: Vec<Tensor<T>> = inputs
        .iter()
        .map(|value| Tensor::new(value.clone(), &tape))
        .collect();
    let output = func(&tape, &leaves)?;
    if output.shape() != (1, 1) && !tape.is_elementwise_only() {
        return Err(GradCheckError::NonScalarOutput {
            shape: output.shape(),
        });
    }
    Ok((tape, leaves, output))
}

/// Checks the gradients computed by the backward pass against central finite
/// differences.
///
/// `func` receives a fresh tape and one leaf tensor per entry of `inputs`. The
/// loss is the sum of the output's entries: the output must be `1x1` unless the
/// tape stayed elementwise-only, in which case summing matches the ones seed of
/// the backward pass.
pub fn check_grad<T, F>(
    func: F,
    inputs: &[Array<T>],
    config: &GradCheckConfig,
) -> Result<(), GradCheckError>
where
    T: Scalar,
    F: Fn(&Tape<T>, &[Tensor<T>]) -> Result<Tensor<T>, WengertError>,
{
    let (_tape, leaves, output) = evaluate(&func, inputs)?;
    let gradient = output.grad()?;

    let loss_at = |input_index: usize, element_index: usize, delta: f64| -> Result<f64, GradCheckError> {
        let mut perturbed = inputs.to_vec();
        let original = &inputs[input_index];
        let mut data = original.as_slice().to_vec();
        let shifted = to_f64(data[element_index]) + delta;
        data[element_index] = cast(shifted).ok_or(GradCheckError::ConversionError(shifted))?;
        perturbed[input_index] = Array::from_vec(original.rows(), original.cols(), data)?;
        let (_tape, _leaves, out) = evaluate(&func, &perturbed)?;
        Ok(to_f64(out.value().sum()))
    };

    for (input_index, (leaf, original)) in leaves.iter().zip(inputs).enumerate() {
        let analytical = gradient.value(leaf);
        if analytical.shape() != original.shape() {
            return Err(GradCheckError::MissingAnalyticalGrad {
                input_index,
                expected: original.shape(),
                actual: analytical.shape(),
            });
        }

        for element_index in 0..original.len() {
            let loss_plus = loss_at(input_index, element_index, config.epsilon)?;
            let loss_minus = loss_at(input_index, element_index, -config.epsilon)?;
            let numerical_grad = (loss_plus - loss_minus) / (2.0 * config.epsilon);
            let analytical_grad = to_f64(analytical.as_slice()[element_index]);

            if !numerical_grad.is_finite() {
                return Err(GradCheckError::NumericalGradNaNOrInfinite {
                    input_index,
                    element_index,
                    loss_plus,
                    loss_minus,
                });
            }
            if !analytical_grad.is_finite() {
                return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                    input_index,
                    element_index,
                    value: analytical_grad,
                });
            }

            if !relative_eq!(
                analytical_grad,
                numerical_grad,
                epsilon = config.tolerance,
                max_relative = config.tolerance
            ) {
                return Err(GradCheckError::GradientMismatch {
                    input_index,
                    element_index,
                    analytical_grad,
                    numerical_grad,
                    difference: (analytical_grad - numerical_grad).abs(),
                });
            }
        }
        debug!("check_grad: input {} matches ({} elements)", input_index, original.len());
    }

    Ok(())
}
