use bevy::prelude::*;
use bevy::math::primitives::{Cuboid, Sphere};

use crate::simulation::scenario::Scenario;
use crate::simulation::math::{NQuat, NVec3};

/// Component tagging each sphere with its slot index into the registry
#[derive(Component)]
struct BodyIndex(pub usize);

/// Component tagging each rotor cuboid with its magnet index
#[derive(Component)]
struct RotorIndex(pub usize);

/// Component tagging each field-tip marker with its magnet index
#[derive(Component)]
struct FieldIndex(pub usize);

/// Component tagging each coil marker with its stator and slot indices
#[derive(Component)]
struct CoilIndex {
    stator: usize,
    pole: u32,
}

/// World-space → screen-space scaling factor for positions and radii
const SCALE3D: f32 = 50.0;

/// Distance of the camera from the origin along +Z
const CAMERA_DISTANCE: f32 = 600.0;

/// Screen-space length of a unit field vector
const FIELD_SCALE: f32 = 40.0;

/// Visual radius of a charged body, world units
const BODY_RADIUS: f32 = 0.15;

/// Entrypoint: hand a built scenario to the Bevy viewer
pub fn run_3d(scenario: Scenario) {
    println!(
        "run_3d: starting Bevy viewer with {} magnets, {} stators, {} charged bodies",
        scenario.world.magnets.len(),
        scenario.world.stators.len(),
        scenario.world.registry.iter_active().count()
    );

    App::new()
        .insert_resource(scenario)
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_3d)
        .add_systems(
            Update,
            (
                physics_step_3d,
                sync_bodies_3d,
                sync_rotors_3d,
                sync_fields_3d,
                sync_coils_3d,
            ),
        )
        .run();
}

fn to_bevy(v: NVec3) -> Vec3 {
    Vec3::new(v.x as f32, v.y as f32, v.z as f32)
}

fn to_bevy_quat(q: NQuat) -> Quat {
    let coords = q.into_inner().coords; // [i, j, k, w]
    Quat::from_xyzw(
        coords.x as f32,
        coords.y as f32,
        coords.z as f32,
        coords.w as f32,
    )
}

/// Screen-space anchor for magnet `i`; rotors are spaced along -Z so
/// multi-magnet scenarios do not overlap
fn magnet_anchor(i: usize) -> Vec3 {
    Vec3::new(0.0, 0.0, -(i as f32) * 4.0 * SCALE3D)
}

/// Startup system: spawn camera, light, rotors, coils and body spheres
fn setup_3d(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    scenario: Res<Scenario>,
) {
    // Simple 3D camera looking at the origin
    commands.spawn(Camera3dBundle {
        camera: Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb(0.0, 0.0, 0.0)), // pure black
            ..Default::default()
        },
        transform: Transform::from_xyz(200.0, 150.0, CAMERA_DISTANCE)
            .looking_at(Vec3::ZERO, Vec3::Y),
        ..Default::default()
    });

    // Basic point light
    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 1500.0,
            range: 2000.0,
            ..Default::default()
        },
        transform: Transform::from_xyz(100.0, 100.0, CAMERA_DISTANCE),
        ..Default::default()
    });

    // One elongated cuboid per rotor magnet, long axis along the default
    // moment direction (+X), plus a small marker at the field tip
    for (i, magnet) in scenario.world.magnets.iter().enumerate() {
        commands.spawn((
            PbrBundle {
                mesh: meshes.add(Cuboid::new(
                    2.4 * SCALE3D,
                    0.5 * SCALE3D,
                    0.5 * SCALE3D,
                )),
                material: materials.add(StandardMaterial {
                    base_color: Color::srgb(0.9, 0.2, 0.2),
                    ..Default::default()
                }),
                transform: Transform {
                    translation: magnet_anchor(i),
                    rotation: to_bevy_quat(magnet.orientation()),
                    ..Default::default()
                },
                ..Default::default()
            },
            RotorIndex(i),
        ));

        commands.spawn((
            PbrBundle {
                mesh: meshes.add(Sphere::new(0.1 * SCALE3D).mesh()),
                material: materials.add(StandardMaterial {
                    base_color: Color::srgb(0.2, 0.9, 0.9),
                    unlit: true,
                    ..Default::default()
                }),
                transform: Transform::from_translation(
                    magnet_anchor(i) + to_bevy(magnet.field()) * FIELD_SCALE,
                ),
                ..Default::default()
            },
            FieldIndex(i),
        ));
    }

    // Coil markers around each stator, from the same placements the core
    // hands to any coil rig
    for (si, binding) in scenario.world.stators.iter().enumerate() {
        let anchor = magnet_anchor(binding.magnet);

        for (pole, placement) in binding.controller.coil_placements().iter().enumerate() {
            commands.spawn((
                PbrBundle {
                    mesh: meshes.add(Sphere::new(0.12 * SCALE3D).mesh()),
                    material: materials.add(StandardMaterial {
                        base_color: Color::srgb(0.4, 0.4, 0.4),
                        unlit: true,
                        ..Default::default()
                    }),
                    transform: Transform::from_translation(
                        anchor + to_bevy(placement.position) * SCALE3D,
                    ),
                    ..Default::default()
                },
                CoilIndex {
                    stator: si,
                    pole: pole as u32,
                },
            ));
        }
    }

    // One sphere per charged body: red for positive, blue for negative
    for (handle, charged) in scenario.world.registry.iter_active() {
        let color = if charged.charge >= 0.0 {
            Color::srgb(1.0, 0.3, 0.3)
        } else {
            Color::srgb(0.3, 0.3, 1.0)
        };

        commands.spawn((
            PbrBundle {
                mesh: meshes.add(Sphere::new(BODY_RADIUS * SCALE3D).mesh()),
                material: materials.add(StandardMaterial {
                    base_color: color,
                    unlit: true,
                    ..Default::default()
                }),
                transform: Transform::from_translation(to_bevy(charged.body.x) * SCALE3D),
                ..Default::default()
            },
            BodyIndex(handle.index()),
        ));
    }
}

/// Per-frame physics integration: one fixed step of the whole world
fn physics_step_3d(mut scenario: ResMut<Scenario>) {
    scenario.world.step();
}

fn sync_bodies_3d(scenario: Res<Scenario>, mut query: Query<(&BodyIndex, &mut Transform)>) {
    for (BodyIndex(i), mut transform) in &mut query {
        if let Some(charged) = scenario
            .world
            .registry
            .iter_active()
            .find(|(h, _)| h.index() == *i)
            .map(|(_, b)| b)
        {
            transform.translation = to_bevy(charged.body.x) * SCALE3D;
        }
    }
}

fn sync_rotors_3d(scenario: Res<Scenario>, mut query: Query<(&RotorIndex, &mut Transform)>) {
    for (RotorIndex(i), mut transform) in &mut query {
        if let Some(magnet) = scenario.world.magnets.get(*i) {
            transform.rotation = to_bevy_quat(magnet.orientation());
        }
    }
}

fn sync_fields_3d(scenario: Res<Scenario>, mut query: Query<(&FieldIndex, &mut Transform)>) {
    for (FieldIndex(i), mut transform) in &mut query {
        if let Some(magnet) = scenario.world.magnets.get(*i) {
            transform.translation = magnet_anchor(*i) + to_bevy(magnet.field()) * FIELD_SCALE;
        }
    }
}

/// Highlight the currently energized coil of each stator
fn sync_coils_3d(
    scenario: Res<Scenario>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    query: Query<(&CoilIndex, &Handle<StandardMaterial>)>,
) {
    for (coil, handle) in &query {
        let Some(binding) = scenario.world.stators.get(coil.stator) else {
            continue;
        };
        let Some(magnet) = scenario.world.magnets.get(binding.magnet) else {
            continue;
        };

        let active = binding.controller.active_pole(magnet);

        if let Some(material) = materials.get_mut(handle) {
            material.base_color = if coil.pole == active {
                Color::srgb(1.0, 0.9, 0.2)
            } else {
                Color::srgb(0.4, 0.4, 0.4)
            };
        }
    }
}
