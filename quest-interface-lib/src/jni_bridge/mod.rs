//! JNI bridge for Android
//!
//! Native side of `io.highfidelity.questInterface.QuestActivity`.
//!
//! ## Architecture
//!
//! - `types`: the bridge for the live activity, held in a global slot
//! - `lifecycle`: JNI exports for onCreate/onResume/onPause/onDestroy
//! - `callbacks`: C exports the engine calls back into
//! - `engine`: the engine's C entry points wrapped as a `VrEngine`
//! - `looper`: UI-thread dispatcher on top of the main `ALooper`
//!
//! ## Thread Model
//!
//! - Lifecycle JNI calls arrive on the Android main thread, which is also
//!   where the looper handler is attached
//! - The engine may call `questOnAppLoadedComplete` from any of its threads;
//!   the post-load hook always runs back on the main thread

pub mod callbacks;
pub mod engine;
pub mod lifecycle;
pub mod looper;
pub mod types;

// Re-export main entry points
pub use callbacks::questOnAppLoadedComplete;
pub use lifecycle::{
    Java_io_highfidelity_questInterface_QuestActivity_nativeOnCreate,
    Java_io_highfidelity_questInterface_QuestActivity_nativeOnDestroy,
    Java_io_highfidelity_questInterface_QuestActivity_nativeOnPause,
    Java_io_highfidelity_questInterface_QuestActivity_nativeOnResume,
};
