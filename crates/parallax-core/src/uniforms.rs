use glam::{Mat4, Vec2, Vec3};

/// GPU layout of `PlaneUniforms` in `parallax.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PlaneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub mouse: [f32; 2],
    pub threshold: [f32; 2],
}

impl PlaneUniforms {
    pub fn new(view_proj: Mat4, plane_scale: Vec3, mouse: Vec2, threshold: Vec2) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            model: Mat4::from_scale(plane_scale).to_cols_array_2d(),
            mouse: mouse.to_array(),
            threshold: threshold.to_array(),
        }
    }

    pub fn mouse(&self) -> Vec2 {
        Vec2::from(self.mouse)
    }
}
