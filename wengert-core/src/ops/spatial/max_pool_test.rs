use super::*;
use crate::array::Array;
use crate::autograd::grad_check::{check_grad, GradCheckConfig};
use crate::autograd::Tape;
use crate::utils::testing::check_array_near;

fn sample(tape: &Tape<f64>) -> Tensor<f64> {
    let data = vec![
        1.0, 5.0, 2.0, 0.0, //
        3.0, 4.0, 7.0, 7.0, //
        -1.0, -2.0, 6.0, 1.0, //
        -3.0, -0.5, 2.0, 9.0,
    ];
    Tensor::new(Array::from_vec(4, 4, data).unwrap(), tape)
}

#[test]
fn test_max_pooling_forward() {
    let tape = Tape::new();
    let x = sample(&tape);
    let pooled = max_pooling_op(&x, (2, 2)).unwrap();
    check_array_near(pooled.value(), (2, 2), &[5.0, 7.0, -0.5, 9.0], 0.0);
    assert_eq!(pooled.kind(), Some(NodeKind::Pooling { window: (2, 2) }));
    assert!(!tape.is_elementwise_only());
}

#[test]
fn test_max_pooling_backward_routes_to_winners() {
    let tape = Tape::new();
    let x = sample(&tape);
    let pooled = max_pooling_op(&x, (2, 2)).unwrap();
    let loss = pooled.squared_norm().unwrap();
    let grad = loss.grad().unwrap();
    // dL/dpooled = 2 * pooled, routed to the winners. The tie 7/7 goes to (1, 2).
    let expected = vec![
        0.0, 10.0, 0.0, 0.0, //
        0.0, 0.0, 14.0, 0.0, //
        0.0, 0.0, 0.0, 0.0, //
        0.0, -1.0, 0.0, 18.0,
    ];
    check_array_near(&grad.value(&x), (4, 4), &expected, 1e-12);
}

#[test]
fn test_max_pooling_rectangular_window() {
    let tape = Tape::new();
    let x = sample(&tape);
    let pooled = max_pooling_op(&x, (1, 4)).unwrap();
    check_array_near(pooled.value(), (4, 1), &[5.0, 7.0, 6.0, 9.0], 0.0);
}

#[test]
fn test_max_pooling_invalid_window() {
    let tape = Tape::new();
    let x = sample(&tape);
    assert!(matches!(
        max_pooling_op(&x, (3, 2)),
        Err(WengertError::StructuralInvalid { .. })
    ));
    assert!(matches!(
        max_pooling_op(&x, (0, 2)),
        Err(WengertError::StructuralInvalid { .. })
    ));
    assert_eq!(tape.len(), 1);
    assert!(tape.is_elementwise_only());
}

#[test]
fn test_max_pooling_grad_check() {
    // Distinct values keep the argmax stable under the finite-difference step.
    let x = Array::from_vec(2, 4, vec![0.1, 0.9, -0.4, 0.3, 0.5, -0.2, 0.8, 0.6]).unwrap();
    check_grad(
        |_tape: &Tape<f64>, t: &[Tensor<f64>]| max_pooling_op(&t[0], (2, 2))?.squared_norm(),
        &[x],
        &GradCheckConfig::default(),
    )
    .unwrap();
}
