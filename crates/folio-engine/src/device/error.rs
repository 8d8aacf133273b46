/// What the frame loop does after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Lost or outdated; the surface was reconfigured and the next frame may render.
    Reconfigured,
    /// Timeout or other transient failure; drop this frame.
    SkipFrame,
    /// Out of memory; the runtime exits.
    Fatal,
}
