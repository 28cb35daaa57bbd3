//! Camera module - orthographic camera, frustum planes, and viewport size.
//!
//! Cameras are passive containers owned by the scene manager. The
//! auto-framer and orbit controls write to them; the renderer reads them.

mod frustum;
mod orthographic_camera;
mod viewport;

pub use frustum::{
    Frustum, FrustumTest,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
pub use orthographic_camera::{CameraUniform, OrthoBounds, OrthographicCamera};
pub use viewport::ViewportSize;
