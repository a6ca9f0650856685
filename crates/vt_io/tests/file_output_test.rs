// crates/vt_io/tests/file_output_test.rs

//! 文件输出测试

use glam::DVec3;
use tempfile::tempdir;
use vt_io::{read_f64s, ByteOutput, IoError};
use vt_physics::{
    sample_concentration, sample_velocity_field, BurgersParams, BurgersVortex, Delimiter,
    GridDescriptor, ParticleStore, VortexFrame,
};

fn grid() -> GridDescriptor {
    GridDescriptor::new([2, 2, 2], Delimiter::unit()).unwrap()
}

#[test]
fn test_trajectory_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("trajectories.bin");

    let mut store = ParticleStore::new();
    store.add(DVec3::new(0.25, 0.5, 0.75), DVec3::new(0.0, 0.0, 2.0), 0);

    let mut out = ByteOutput::create(&path).unwrap();
    out.write_trajectories(true, 0.0, grid().delimiter(), &store).unwrap();
    store.get_mut(0).unwrap().position.z = 0.8;
    out.write_trajectories(false, 0.1, grid().delimiter(), &store).unwrap();
    out.close().unwrap();

    let values = read_f64s(&std::fs::read(&path).unwrap());
    assert_eq!(values.len(), 6 + 6 + 6);
    assert_eq!(&values[..6], &[0.0, 1.0, 0.0, 1.0, 0.0, 1.0]);
    assert_eq!(&values[6..12], &[0.0, 0.0, 0.25, 0.5, 0.75, 2.0]);
    assert_eq!(values[12], 0.1);
    assert_eq!(values[16], 0.8);
}

#[test]
fn test_drop_without_close_flushes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("concentration.bin");

    let g = grid();
    let field = sample_concentration(&ParticleStore::new(), &g);
    {
        let mut out = ByteOutput::create(&path).unwrap();
        out.write_concentration(true, 0.05, &g, &field).unwrap();
    }

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), 8 * (10 + 8));
    assert_eq!(read_f64s(&bytes)[9], 0.05);
}

#[test]
fn test_velocity_file_size() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("velocity.bin");

    let model = BurgersVortex::new(
        BurgersParams {
            kappa: 1.0,
            alpha: 0.1,
            stretching_r: 1.0,
            stretching_z: 1.0,
            nu: 1e-3,
        },
        VortexFrame::identity(),
    )
    .unwrap();
    let g = GridDescriptor::new([3, 2, 4], Delimiter::unit()).unwrap();

    let mut out = ByteOutput::create(&path).unwrap();
    for n in 0..3 {
        let t = n as f64 * 0.5;
        let field = sample_velocity_field(&model, &g, t).unwrap();
        out.write_velocity_field(t, &g, &field).unwrap();
    }
    out.close().unwrap();

    let per_call = 10 + 3 * 24;
    assert_eq!(std::fs::metadata(&path).unwrap().len(), (8 * 3 * per_call) as u64);
}

#[test]
fn test_open_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("out.bin");
    let err = ByteOutput::create(&path).unwrap_err();
    assert!(matches!(err, IoError::Open { .. }));
}
