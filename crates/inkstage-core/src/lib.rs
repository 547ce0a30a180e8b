//! Inkstage Core Library
//!
//! Platform-agnostic element model, tools and transform gestures for the
//! inkstage canvas editor. Rendering and hit testing live with the host.

pub mod camera;
pub mod config;
pub mod editor;
pub mod element;
pub mod error;
pub mod input;
pub mod outline;
pub mod store;
pub mod tools;
pub mod transform;

pub use camera::{Camera, Viewport};
pub use config::{DrawingStyle, EngineConfig};
pub use editor::Editor;
pub use element::{Element, ElementId, ElementKind, ElementPatch};
pub use error::{EngineError, EngineResult};
pub use input::{ClickTracker, MouseButton, PointerEvent, PointerPhase, PointerTarget};
pub use outline::{Outline, element_outline};
pub use store::{ElementStore, Workspace};
pub use tools::{ToolKind, ToolOutcome};
pub use transform::{Handle, HandleKind, HandleRole, element_handles, hit_test_handles};
