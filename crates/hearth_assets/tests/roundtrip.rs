//! # Typed Asset Round-Trips
//!
//! Arbitrary configs, data tables and levels must survive
//! `to_container_bytes` -> `from_container_bytes` unchanged.

#![allow(missing_docs)]

use hearth_assets::{ContainerConfig, DataAsset, GameConfig, LevelAsset, TypedAsset};
use hearth_core::{Actor, Color, IOConnection, Param, Sector, Vec2};
use proptest::prelude::*;

fn name() -> impl Strategy<Value = String> {
    "[a-z0-9_ ]{0,12}"
}

fn color() -> impl Strategy<Value = Color> {
    (0.0f32..=1.0, 0.0f32..=1.0, 0.0f32..=1.0, 0.0f32..=1.0)
        .prop_map(|(r, g, b, a)| Color::new(r, g, b, a))
}

fn param() -> impl Strategy<Value = Param> {
    prop_oneof![
        Just(Param::None),
        any::<u8>().prop_map(Param::Byte),
        any::<i32>().prop_map(Param::Int),
        (-1.0e6f32..1.0e6).prop_map(Param::Float),
        any::<bool>().prop_map(Param::Bool),
        name().prop_map(Param::String),
        color().prop_map(Param::Color),
    ]
}

fn sector() -> impl Strategy<Value = Sector> {
    (
        prop::collection::vec(((-64.0f32..64.0, -64.0f32..64.0), name()), 0..6),
        -8.0f32..8.0,
        -8.0f32..8.0,
        name(),
        name(),
        color(),
    )
        .prop_map(|(walls, floor_height, ceiling_height, floor_material, ceiling_material, light_color)| {
            let (points, wall_materials) = walls
                .into_iter()
                .map(|((x, y), material)| (Vec2::new(x, y), material))
                .unzip();
            Sector {
                points,
                wall_materials,
                floor_height,
                ceiling_height,
                floor_material,
                ceiling_material,
                light_color,
            }
        })
}

fn connection() -> impl Strategy<Value = IOConnection> {
    (name(), name(), name(), param()).prop_map(|(target_name, source_output, target_input, param)| {
        IOConnection {
            target_name,
            source_output,
            target_input,
            param,
        }
    })
}

fn actor() -> impl Strategy<Value = Actor> {
    (
        name(),
        name(),
        prop::collection::btree_map(name(), param(), 0..5),
        prop::collection::vec(connection(), 0..3),
    )
        .prop_map(|(type_name, name, params, connections)| Actor {
            type_name,
            name,
            params,
            connections,
        })
}

fn container_config() -> impl Strategy<Value = ContainerConfig> {
    (0u32..=9, 1usize..256).prop_map(|(compression_level, chunk_size)| ContainerConfig {
        compression_level,
        chunk_size,
    })
}

proptest! {
    #[test]
    fn game_config_roundtrip(
        title in name(),
        start_level in name(),
        window_scale in 0usize..64,
        config in container_config(),
    ) {
        let game = GameConfig { title, start_level, window_scale };
        let bytes = game.to_container_bytes(&config).unwrap();
        prop_assert_eq!(GameConfig::from_container_bytes(&bytes).unwrap(), game);
    }

    #[test]
    fn data_asset_roundtrip(
        entries in prop::collection::btree_map(name(), param(), 0..16),
        config in container_config(),
    ) {
        let data = DataAsset { entries };
        let bytes = data.to_container_bytes(&config).unwrap();
        prop_assert_eq!(DataAsset::from_container_bytes(&bytes).unwrap(), data);
    }

    #[test]
    fn level_asset_roundtrip(
        name in name(),
        ambient in color(),
        sectors in prop::collection::vec(sector(), 0..4),
        actors in prop::collection::vec(actor(), 0..4),
        config in container_config(),
    ) {
        let level = LevelAsset { name, ambient, sectors, actors };
        let bytes = level.to_container_bytes(&config).unwrap();
        prop_assert_eq!(LevelAsset::from_container_bytes(&bytes).unwrap(), level);
    }
}
