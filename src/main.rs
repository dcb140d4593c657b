use anyhow::Context;
use bevy_app::{App, AppExit, Startup};
use bevy_ecs::prelude::*;
use bevy_log::{LogPlugin, error, info};
use renoise_world::bevy::{NoisePlugin, NoiseWorld};
use renoise_world::{CHUNK_SIZE, WorldSettings};
use std::path::Path;

fn main() -> AppExit {
    let mut app = App::new();
    app.add_plugins(LogPlugin::default());

    let settings = match std::env::args().nth(1) {
        Some(path) => match load_settings(Path::new(&path)) {
            Ok(settings) => settings,
            Err(err) => {
                error!("{err:#}");
                return AppExit::error();
            }
        },
        None => WorldSettings::default(),
    };

    app.add_plugins(NoisePlugin { settings })
        .add_systems(Startup, log_world_summary)
        .run()
}

fn load_settings(path: &Path) -> anyhow::Result<WorldSettings> {
    let bytes =
        std::fs::read(path).with_context(|| format!("reading settings {}", path.display()))?;
    WorldSettings::from_json(&bytes)
        .with_context(|| format!("parsing settings {}", path.display()))
}

fn log_world_summary(world: Option<Res<NoiseWorld>>, mut exit: MessageWriter<AppExit>) {
    let Some(world) = world else {
        exit.write(AppExit::error());
        return;
    };
    let (min, max) = world
        .chunks()
        .filter_map(|chunk| chunk.samples())
        .flatten()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let sampled = world.chunks().filter(|chunk| chunk.is_sampled()).count();
    info!(
        size = world.size(),
        frequency = world.frequency(),
        chunk_size = CHUNK_SIZE,
        sampled,
        min,
        max,
        "noise world ready"
    );
}
