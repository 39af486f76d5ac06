pub mod reel;
pub mod run;

pub use reel::{
    CallToAction, CaptionPreferences, CreateReelRequest, CreateReelResponse, FluxModelConfig,
    FluxPromptRequest, IdealClientProfile, KlingPreferences,
};
pub use run::{RunId, RunState, RunStatus, RunStep};
