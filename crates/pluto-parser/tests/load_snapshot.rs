//! Load snapshots from a synthetic dbl output directory.

use hydro_common::{Field, HydroError, SnapshotSource};
use pluto_parser::PlutoDblSource;
use test_utils::{write_dbl_output, DblVariable};

fn variables(nx1: usize, nx2: usize) -> Vec<DblVariable> {
    vec![
        DblVariable::from_fn("rho", nx1, nx2, |i, j| 1.0 + i as f64 + 10.0 * j as f64),
        DblVariable::from_fn("vx1", nx1, nx2, |i, _| -(i as f64)),
        DblVariable::from_fn("prs", nx1, nx2, |_, _| 7.0),
        DblVariable::from_fn("T", nx1, nx2, |_, j| 1e4 * (j as f64 + 1.0)),
    ]
}

#[test]
fn test_load_snapshot_fields() {
    let dir = tempfile::tempdir().unwrap();
    let x1_edges = [1.0, 2.0, 4.0, 8.0];
    let x2_edges = [0.0, 0.5, 1.0];
    write_dbl_output(dir.path(), 3, 2.5, &x1_edges, &x2_edges, &variables(3, 2)).unwrap();

    let source = PlutoDblSource::new(dir.path());
    let snap = source.load(3).unwrap();

    assert_eq!(snap.cycle, 3);
    assert_eq!(snap.time, 2.5);
    assert_eq!(snap.x1, vec![1.5, 3.0, 6.0]);
    assert_eq!(snap.x2, vec![0.25, 0.75]);
    assert_eq!(snap.value(Field::Density, 2, 1).unwrap(), 13.0);
    assert_eq!(snap.value(Field::Vx1, 1, 0).unwrap(), -1.0);
    assert_eq!(snap.value(Field::Temperature, 0, 1).unwrap(), 2e4);
    // unused variables are dropped
    assert!(!snap.has_field(Field::Vx2));
}

#[test]
fn test_missing_cycle() {
    let dir = tempfile::tempdir().unwrap();
    write_dbl_output(dir.path(), 0, 0.0, &[1.0, 2.0], &[0.0, 1.0], &variables(1, 1)).unwrap();

    let err = PlutoDblSource::new(dir.path()).load(5).unwrap_err();
    assert!(matches!(err, HydroError::Source(ref msg) if msg.contains("Cycle 5")));
}

#[test]
fn test_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let err = PlutoDblSource::new(dir.path().join("absent")).load(0).unwrap_err();
    assert!(matches!(err, HydroError::Io(_)));
}
