use wengert_core::utils::testing::check_array_near;
use wengert_core::{Array, Tape, Tensor};

mod common;
use common::{init_logger, leaf};

#[test]
fn test_scalar_product_scenario() {
    init_logger();
    let tape = Tape::new();
    let x = leaf(&tape, 1, 1, vec![2.0]);
    let y = leaf(&tape, 1, 1, vec![3.0]);
    let z = x.mul(&y).unwrap();
    assert_eq!(z.value(), &Array::scalar(6.0));

    let grad = z.grad().unwrap();
    assert_eq!(grad.value(&x), Array::scalar(3.0));
    assert_eq!(grad.value(&y), Array::scalar(2.0));
    assert_eq!(grad.value(&z), Array::scalar(1.0));
}

#[test]
fn test_elementwise_only_non_scalar_root() {
    // z = x * y + x, elementwise: dz/dx = y + 1, dz/dy = x.
    let tape = Tape::new();
    let x = leaf(&tape, 2, 2, vec![1.0, 2.0, 3.0, 4.0]);
    let y = leaf(&tape, 2, 2, vec![-1.0, 0.5, 2.0, 0.0]);
    let z = x.mul(&y).unwrap().add(&x).unwrap();
    assert!(tape.is_elementwise_only());
    let grad = z.grad().unwrap();
    check_array_near(&grad.value(&x), (2, 2), &[0.0, 1.5, 3.0, 1.0], 1e-12);
    check_array_near(&grad.value(&y), (2, 2), &[1.0, 2.0, 3.0, 4.0], 1e-12);
}

#[test]
fn test_repeated_backward_passes_agree() {
    let tape = Tape::new();
    let w = leaf(&tape, 1, 2, vec![0.5, -1.5]);
    let x = leaf(&tape, 2, 1, vec![2.0, 1.0]);
    let loss = w.matprod(&x).unwrap().sigmoid().unwrap().squared_norm().unwrap();
    let len_before = tape.len();

    let first = loss.grad().unwrap();
    let second = loss.grad().unwrap();
    assert_eq!(first.value(&w), second.value(&w));
    assert_eq!(first.value(&x), second.value(&x));
    assert_eq!(tape.len(), len_before);
}

#[test]
fn test_backward_from_intermediate_root() {
    let tape = Tape::new();
    let x = leaf(&tape, 1, 1, vec![3.0]);
    let y = x.mul(&x).unwrap();
    let z = y.mul(&x).unwrap();

    // dy/dx = 2x, dz/dx = 3x²
    assert_eq!(y.grad().unwrap().value(&x), Array::scalar(6.0));
    assert_eq!(z.grad().unwrap().value(&x), Array::scalar(27.0));
}

#[test]
fn test_vert_cat_hands_back_exact_rows() {
    // L = w · cat(a, b), so dL/dcat = wᵗ and each part gets its own rows of it.
    let tape = Tape::new();
    let a = leaf(&tape, 2, 1, vec![1.0, 2.0]);
    let b = leaf(&tape, 3, 1, vec![3.0, 4.0, 5.0]);
    let w = leaf(&tape, 1, 5, vec![10.0, 20.0, 30.0, 40.0, 50.0]);
    let cat = Tensor::vert_cat(&[&a, &b]).unwrap();
    let loss = w.matprod(&cat).unwrap();
    assert_eq!(loss.value(), &Array::scalar(550.0));

    let grad = loss.grad().unwrap();
    check_array_near(&grad.value(&a), (2, 1), &[10.0, 20.0], 0.0);
    check_array_near(&grad.value(&b), (3, 1), &[30.0, 40.0, 50.0], 0.0);
    check_array_near(&grad.value(&w), (1, 5), &[1.0, 2.0, 3.0, 4.0, 5.0], 0.0);
}

#[test]
fn test_flattening_round_trip() {
    let tape = Tape::new();
    let x = leaf(&tape, 2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let flat = x.flattening().unwrap();
    assert_eq!(flat.shape(), (6, 1));
    // Weight entry i scales flat entry i, i.e. x[i / 3, i % 3].
    let w = leaf(&tape, 1, 6, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let loss = w.matprod(&flat).unwrap();
    let grad = loss.grad().unwrap();
    check_array_near(&grad.value(&x), (2, 3), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 0.0);
}

#[test]
fn test_single_layer_closed_form() {
    // L = ||W x - t||², dL/dW = 2 (W x - t) xᵗ
    let tape = Tape::new();
    let w = leaf(&tape, 2, 2, vec![1.0, 0.0, 0.5, -1.0]);
    let x = leaf(&tape, 2, 1, vec![2.0, 1.0]);
    let t = leaf(&tape, 2, 1, vec![1.0, 1.0]);
    let residual = w.matprod(&x).unwrap().sub(&t).unwrap();
    check_array_near(residual.value(), (2, 1), &[1.0, -1.0], 1e-12);
    let loss = residual.squared_norm().unwrap();
    let grad = loss.grad().unwrap();
    check_array_near(&grad.value(&w), (2, 2), &[4.0, 2.0, -4.0, -2.0], 1e-12);
    check_array_near(&grad.value(&t), (2, 1), &[-2.0, 2.0], 1e-12);
}

#[test]
fn test_convolution_pooling_chain() {
    let tape = Tape::new();
    let image = leaf(&tape, 3, 4, (0..12).map(f64::from).collect());
    let kernel = leaf(&tape, 2, 1, vec![1.0, -2.0]);
    // Each output is image[r, c] - 2 image[r + 1, c] = -8 - image[r, c].
    let conv = image.convolution(&kernel).unwrap();
    check_array_near(
        conv.value(),
        (2, 4),
        &[-8.0, -9.0, -10.0, -11.0, -12.0, -13.0, -14.0, -15.0],
        1e-12,
    );
    let pooled = conv.max_pooling((2, 2)).unwrap();
    check_array_near(pooled.value(), (1, 2), &[-8.0, -10.0], 1e-12);

    let ones = leaf(&tape, 2, 1, vec![1.0, 1.0]);
    let loss = pooled.matprod(&ones).unwrap();
    let grad = loss.grad().unwrap();
    // Winners are conv[0, 0] and conv[0, 2]; each spreads the kernel on its column.
    let expected_image = vec![
        1.0, 0.0, 1.0, 0.0, //
        -2.0, 0.0, -2.0, 0.0, //
        0.0, 0.0, 0.0, 0.0,
    ];
    check_array_near(&grad.value(&image), (3, 4), &expected_image, 1e-12);
    // dL/dkernel = image[0, 0] + image[0, 2], image[1, 0] + image[1, 2]
    check_array_near(&grad.value(&kernel), (2, 1), &[2.0, 10.0], 1e-12);
}

#[test]
fn test_f32_pipeline() {
    let tape = Tape::<f32>::new();
    let x = Tensor::new(Array::from_vec(1, 2, vec![1.0f32, 2.0]).unwrap(), &tape);
    let w = Tensor::new(Array::from_vec(2, 1, vec![0.5f32, 0.25]).unwrap(), &tape);
    let loss = x.matprod(&w).unwrap().squared_norm().unwrap();
    assert_eq!(loss.value(), &Array::scalar(1.0f32));
    let grad = loss.grad().unwrap();
    check_array_near(&grad.value(&w), (2, 1), &[2.0f32, 4.0], 1e-6);
}
