use flow_mesh::{
    MeshError, Vector3, Vector4,
    data_structures::{
        mesh::Mesh, model_mesh_instanced::ModelMeshInstanced, transformation::Transformation,
    },
};

use tempfile::TempDir;

mod common;

use common::test_utils::{init_logger, scratch_dir};

/// Exports a cube and returns its path; the directory lives as long as the guard.
fn exported_cube(test_name: &str) -> (TempDir, String) {
    let dir = scratch_dir(test_name);
    Mesh::gen_cube().save_obj(dir.path(), "cube", true).expect("export succeeds");
    let path = dir.path().join("cube.obj").to_str().expect("utf-8 path").to_string();
    (dir, path)
}

fn at(x: f32) -> Transformation {
    Transformation::from_position(Vector3::new(x, 0.0, 0.0))
}

#[test]
fn loads_group_and_copies_initial_instances() {
    init_logger();
    let (_dir, path) = exported_cube("loads_group_and_copies_initial_instances");
    let initial = [at(0.0), at(3.0)];
    let model = ModelMeshInstanced::new(&path, &initial).expect("model loads");

    assert_eq!(model.model_path(), path);
    assert_eq!(model.get_instance_number(), 2);
    assert_eq!(model.get_transformations(), &initial);
    assert_eq!(model.model_mesh_group().vertex_count(), 27);
    assert_eq!(model.model_mesh_group().triangle_count(), 12);
}

#[test]
fn missing_model_is_a_load_error() {
    assert!(ModelMeshInstanced::new("no/such/model.obj", &[]).is_err());
}

#[test]
fn batch_insertion_goes_to_the_front() {
    let (_dir, path) = exported_cube("batch_insertion_goes_to_the_front");
    let mut model = ModelMeshInstanced::new(&path, &[at(0.0)]).expect("model loads");
    model.add_instance(at(1.0));
    model.add_instances(&[at(2.0), at(3.0)]);
    model.add_instances_at(&[Vector3::new(4.0, 0.0, 0.0)]);

    let xs: Vec<f32> = model.get_transformations().iter().map(|t| t.position.x).collect();
    assert_eq!(xs, vec![2.0, 3.0, 0.0, 1.0, 4.0]);
}

#[test]
fn mismatched_arrays_are_rejected_whole() {
    let (_dir, path) = exported_cube("mismatched_arrays_are_rejected_whole");
    let mut model = ModelMeshInstanced::new(&path, &[]).expect("model loads");
    let result = model.add_instances_with_rotations(
        &[Vector3::new(0.0, 0.0, 0.0)],
        &[Vector4::new(0.0, 1.0, 0.0, 1.0), Vector4::new(1.0, 0.0, 0.0, 1.0)],
    );
    assert!(matches!(result, Err(MeshError::MismatchedInstanceData { .. })));
    assert_eq!(model.get_instance_number(), 0);
}

#[test]
fn accessors_fail_exactly_past_the_end() {
    let (_dir, path) = exported_cube("accessors_fail_exactly_past_the_end");
    let model = ModelMeshInstanced::new(&path, &[at(0.0), at(1.0), at(2.0)]).expect("model loads");
    let count = model.get_instance_number();

    assert_eq!(model.get_transformation(count - 1).expect("last instance"), &at(2.0));
    assert!(matches!(
        model.get_transformation(count),
        Err(MeshError::InstanceOutOfRange { index: 3, count: 3 })
    ));
}

#[test]
fn instance_bounding_boxes_enclose_rotated_cube() {
    let (_dir, path) = exported_cube("instance_bounding_boxes_enclose_rotated_cube");
    let mut model = ModelMeshInstanced::new(&path, &[]).expect("model loads");
    model.add_instance_components(
        5.0,
        0.0,
        0.0,
        std::f32::consts::FRAC_PI_4,
        0.0,
        1.0,
        0.0,
    );

    let bounds = model.get_bounding_box(0).expect("in range");
    let half_diagonal = 0.5 * std::f32::consts::SQRT_2;
    assert!((bounds.min.x - (5.0 - half_diagonal)).abs() < 1e-5);
    assert!((bounds.max.x - (5.0 + half_diagonal)).abs() < 1e-5);
    assert!((bounds.min.y + 0.5).abs() < 1e-5);
    assert!((bounds.max.z - half_diagonal).abs() < 1e-5);
}
