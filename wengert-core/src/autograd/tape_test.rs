use super::*;
use crate::array::Array;

fn leaf(tape: &Tape<f64>, rows: usize, cols: usize) -> Tensor<f64> {
    Tensor::new(Array::ones(rows, cols), tape)
}

#[test]
fn test_new_tape_is_empty() {
    let tape = Tape::<f64>::new();
    assert!(tape.is_empty());
    assert_eq!(tape.len(), 0);
    assert!(tape.is_elementwise_only());
    assert_eq!(tape.generation(), 0);
}

#[test]
fn test_indices_follow_insertion_order() {
    let tape = Tape::new();
    let a = leaf(&tape, 1, 1);
    let b = leaf(&tape, 1, 1);
    let c = a.add(&b).unwrap();
    assert_eq!((a.index(), b.index(), c.index()), (0, 1, 2));
    assert_eq!(tape.len(), 3);
    let nodes = tape.nodes();
    assert!(nodes[2]
        .dependencies
        .iter()
        .all(|dep| dep.index < 2));
}

#[test]
fn test_elementwise_ops_keep_flag() {
    let tape = Tape::new();
    let a = leaf(&tape, 2, 2);
    let b = leaf(&tape, 2, 2);
    let c = a.add(&b).unwrap().sub(&a).unwrap().mul(&b).unwrap();
    c.div(&b).unwrap().sigmoid().unwrap();
    assert!(tape.is_elementwise_only());
}

#[test]
fn test_each_structural_op_clears_flag() {
    type Build = fn(&Tape<f64>) -> Result<Tensor<f64>, WengertError>;
    let builders = [
        ("matprod", (|t: &Tape<f64>| leaf(t, 2, 2).matprod(&leaf(t, 2, 2))) as Build),
        ("squared_norm", (|t: &Tape<f64>| leaf(t, 2, 2).squared_norm()) as Build),
        ("convolution", (|t: &Tape<f64>| leaf(t, 3, 3).convolution(&leaf(t, 2, 2))) as Build),
        ("max_pooling", (|t: &Tape<f64>| leaf(t, 2, 2).max_pooling((2, 2))) as Build),
        (
            "vert_cat",
            (|t: &Tape<f64>| Tensor::vert_cat(&[&leaf(t, 1, 2), &leaf(t, 1, 2)])) as Build,
        ),
        ("flattening", (|t: &Tape<f64>| leaf(t, 2, 2).flattening()) as Build),
    ];
    for (name, build) in builders {
        let tape = Tape::new();
        build(&tape).unwrap();
        assert!(!tape.is_elementwise_only(), "{} kept the flag", name);

        // The flag never comes back through further elementwise work.
        let x = leaf(&tape, 1, 1);
        x.add(&x).unwrap();
        assert!(!tape.is_elementwise_only(), "{} flag came back", name);
    }
}

#[test]
fn test_reset_restores_flag_and_bumps_generation() {
    let mut tape = Tape::new();
    let a = leaf(&tape, 2, 2);
    a.squared_norm().unwrap();
    assert!(!tape.is_elementwise_only());

    tape.reset();
    assert!(tape.is_empty());
    assert!(tape.is_elementwise_only());
    assert_eq!(tape.generation(), 1);

    let fresh = leaf(&tape, 2, 2);
    assert_eq!(fresh.index(), 0);
    assert!(matches!(
        a.add(&fresh),
        Err(WengertError::StaleTensor {
            tensor_generation: 0,
            tape_generation: 1,
            ..
        })
    ));
    assert_eq!(tape.len(), 1);
}

#[test]
fn test_set_optimizable_on_leaves() {
    let tape = Tape::new();
    let w = leaf(&tape, 2, 1);
    let x = leaf(&tape, 2, 1);
    let b = leaf(&tape, 2, 1);
    tape.set_optimizable(&w, true).unwrap();
    tape.set_optimizable(&b, true).unwrap();
    assert!(tape.is_optimizable(&w));
    assert!(!tape.is_optimizable(&x));
    assert_eq!(tape.optimizable_indices(), vec![0, 2]);

    tape.set_optimizable(&w, false).unwrap();
    assert!(!tape.is_optimizable(&w));
    assert_eq!(tape.optimizable_indices(), vec![2]);
}

#[test]
fn test_set_optimizable_rejects_non_leaf_and_foreign() {
    let tape = Tape::new();
    let a = leaf(&tape, 1, 1);
    let sum = a.add(&a).unwrap();
    assert!(matches!(
        tape.set_optimizable(&sum, true),
        Err(WengertError::StructuralInvalid { .. })
    ));

    let other = Tape::new();
    let foreign = leaf(&other, 1, 1);
    assert!(matches!(
        tape.set_optimizable(&foreign, true),
        Err(WengertError::TapeMismatch { .. })
    ));
    assert!(!tape.is_optimizable(&foreign));

    let detached = Tensor::detached(Array::scalar(1.0));
    assert!(matches!(
        tape.set_optimizable(&detached, true),
        Err(WengertError::TapeMismatch { .. })
    ));
}

#[test]
fn test_reset_clears_optimizable() {
    let mut tape = Tape::new();
    let w = leaf(&tape, 1, 1);
    tape.set_optimizable(&w, true).unwrap();
    tape.reset();
    assert!(tape.optimizable_indices().is_empty());
    assert!(!tape.is_optimizable(&w));
    let fresh = leaf(&tape, 1, 1);
    assert!(!tape.is_optimizable(&fresh));
}
