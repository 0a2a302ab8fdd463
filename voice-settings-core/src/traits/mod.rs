pub mod capability_provider;
pub mod media_track;
pub mod preference_store;
pub mod settings_delegate;
pub mod voice_pipeline;
