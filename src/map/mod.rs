use bevy::prelude::*;

// Map-related modules
pub mod biome;
pub mod climate;
pub mod coast;
pub mod error;
pub mod features;
pub mod generator;
pub mod grid;
pub mod heightmap;
pub mod hex;
pub mod preview;
pub mod projection;
pub mod snapshot;
pub mod tiles;

// Re-exports for convenience
pub use coast::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use heightmap::*;
pub use hex::*;
pub use preview::*;
pub use projection::*;
pub use snapshot::*;
pub use tiles::*;

/// Ask for a new map; replaces any generation already in progress
#[derive(Message, Debug, Clone)]
pub struct GenerateMapRequest {
    pub options: MapOptions,
}

/// Abandon the running generation, if any
#[derive(Message, Debug, Clone, Copy)]
pub struct CancelMapGeneration;

/// Written after each finished phase
#[derive(Message, Debug, Clone, PartialEq)]
pub struct MapGenerationProgress {
    pub phase: GenerationPhase,
    pub status: &'static str,
    pub fraction: f32,
}

impl From<GenerationProgress> for MapGenerationProgress {
    fn from(progress: GenerationProgress) -> Self {
        Self {
            phase: progress.phase,
            status: progress.status,
            fraction: progress.fraction,
        }
    }
}

/// Written once the new map is available as [`ActiveMap`]
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapGenerated {
    pub cols: u32,
    pub rows: u32,
    pub seed: u64,
}

/// Generation currently being advanced, one phase per frame
#[derive(Resource)]
pub struct MapGenerationTask {
    generation: MapGeneration,
}

impl MapGenerationTask {
    pub fn pending_phase(&self) -> Option<GenerationPhase> {
        self.generation.pending_phase()
    }

    pub fn options(&self) -> &MapOptions {
        self.generation.options()
    }
}

/// The most recently completed map
#[derive(Resource, Debug, Clone)]
pub struct ActiveMap {
    pub options: MapOptions,
    pub map: GeneratedMap,
}

impl ActiveMap {
    pub fn grid(&self) -> &Grid {
        &self.map.grid
    }
}

/// Plugin that runs map generation inside the app's `Update` schedule
pub struct MapGenerationPlugin;

impl Plugin for MapGenerationPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<GenerateMapRequest>()
            .add_message::<CancelMapGeneration>()
            .add_message::<MapGenerationProgress>()
            .add_message::<MapGenerated>();

        // Cancellation first so a request sent in the same frame still starts
        app.add_systems(
            Update,
            (
                cancel_map_generation,
                start_map_generation,
                advance_map_generation,
            )
                .chain(),
        );
    }
}

fn cancel_map_generation(
    mut commands: Commands,
    mut cancels: MessageReader<CancelMapGeneration>,
    task: Option<Res<MapGenerationTask>>,
) {
    if cancels.read().count() == 0 {
        return;
    }
    if let Some(task) = task {
        info!(
            "Cancelled map generation before {:?}",
            task.pending_phase()
        );
        commands.remove_resource::<MapGenerationTask>();
    }
}

fn start_map_generation(
    mut commands: Commands,
    mut requests: MessageReader<GenerateMapRequest>,
    task: Option<Res<MapGenerationTask>>,
) {
    let Some(request) = requests.read().last() else {
        return;
    };

    match MapGeneration::new(request.options.clone()) {
        Ok(generation) => {
            if task.is_some() {
                info!("Replacing the map generation in progress");
            }
            info!(
                "Starting {} map generation: {}x{}, seed {}",
                request.options.map_type.name(),
                request.options.cols,
                request.options.rows,
                request.options.seed
            );
            commands.insert_resource(MapGenerationTask { generation });
        }
        Err(e) => error!("Rejected map generation request: {}", e),
    }
}

fn advance_map_generation(
    mut commands: Commands,
    task: Option<ResMut<MapGenerationTask>>,
    mut progress_writer: MessageWriter<MapGenerationProgress>,
    mut generated_writer: MessageWriter<MapGenerated>,
) {
    let Some(mut task) = task else {
        return;
    };

    if let Some(progress) = task.generation.next() {
        progress_writer.write(progress.into());
    }

    let Some(map) = task.generation.take_result() else {
        return;
    };
    let options = task.generation.options().clone();
    commands.remove_resource::<MapGenerationTask>();

    info!("Map generation finished");
    generated_writer.write(MapGenerated {
        cols: options.cols,
        rows: options.rows,
        seed: options.seed,
    });
    commands.insert_resource(ActiveMap { options, map });
}
