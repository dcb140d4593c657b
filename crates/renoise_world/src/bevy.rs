use crate::pos::{ChunkPos, ChunkRect};
use crate::settings::WorldSettings;
use crate::world::World;
use bevy_app::{App, Plugin, Update};
use bevy_derive::{Deref, DerefMut};
use bevy_ecs::prelude::{Message, MessageReader, ResMut, Resource};
use tracing::{error, warn};

/// Builds a [`NoiseWorld`] from its settings and applies
/// [`RegenerateRequest`]s every frame.
pub struct NoisePlugin {
    pub settings: WorldSettings,
}

impl Plugin for NoisePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<RegenerateRequest>()
            .add_systems(Update, apply_regenerate_requests);

        match World::from_settings(&self.settings) {
            Ok(world) => {
                app.insert_resource(NoiseWorld(world));
            }
            Err(err) => error!(settings = ?self.settings, "failed to build noise world: {err}"),
        }
    }
}

#[derive(Resource, Deref, DerefMut)]
pub struct NoiseWorld(pub World);

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegenerateRequest {
    Rect(ChunkRect),
    FullChunk(ChunkPos),
}

fn apply_regenerate_requests(
    mut requests: MessageReader<RegenerateRequest>,
    world: Option<ResMut<NoiseWorld>>,
) {
    let Some(mut world) = world else {
        requests.clear();
        return;
    };
    for request in requests.read() {
        let result = match *request {
            RegenerateRequest::Rect(rect) => {
                world.regenerate_rect(rect.min.x, rect.min.y, rect.width(), rect.height())
            }
            RegenerateRequest::FullChunk(pos) => world.regenerate_full_chunk(pos.x, pos.y),
        };
        if let Err(err) = result {
            warn!(?request, "dropped regeneration request: {err}");
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use bevy_ecs::message::Messages;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(NoisePlugin {
            settings: WorldSettings::new(6, 0.2).with_seed(21),
        });
        app
    }

    #[test]
    fn plugin_inserts_world() {
        let app = app();
        let world = app.world().resource::<NoiseWorld>();
        assert_eq!(world.size(), 6);
        assert!(world.sample(40, 40).is_ok());
    }

    #[test]
    fn requests_are_applied_on_update() {
        let mut app = app();
        let pos = ChunkPos::new(2, 2);
        let before = app.world().resource::<NoiseWorld>().chunk(pos).unwrap().gradients();
        let before = before.to_vec();

        let mut messages = app.world_mut().resource_mut::<Messages<RegenerateRequest>>();
        messages.write(RegenerateRequest::FullChunk(pos));
        messages.write(RegenerateRequest::FullChunk(ChunkPos::new(40, 0)));
        app.update();

        let after = app.world().resource::<NoiseWorld>().chunk(pos).unwrap().gradients();
        assert_ne!(before.as_slice(), after);
    }

    #[test]
    fn invalid_settings_leave_no_world() {
        let mut app = App::new();
        app.add_plugins(NoisePlugin {
            settings: WorldSettings::new(8, 0.01),
        });
        app.update();
        assert!(app.world().get_resource::<NoiseWorld>().is_none());
    }
}
