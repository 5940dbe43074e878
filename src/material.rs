//! Surface materials and the shared handle meshes hold them through.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::error::{ConstructionError, SceneResult};
use crate::math::Color;

/// Base colour plus roughness in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialSpec {
    pub color: Color,
    pub roughness: f32,
}

impl MaterialSpec {
    pub fn new(color: Color, roughness: f32) -> SceneResult<Self> {
        if !(0.0..=1.0).contains(&roughness) {
            return Err(ConstructionError::InvalidRoughness(roughness));
        }
        Ok(Self { color, roughness })
    }

    /// Fully rough material, as every prop in the garden uses.
    pub fn matte(color: Color) -> Self {
        Self {
            color,
            roughness: 1.0,
        }
    }
}

impl Default for MaterialSpec {
    fn default() -> Self {
        Self::matte(Color::WHITE)
    }
}

/// Reference-counted handle to a [`MaterialSpec`].
///
/// Every mesh built from clones of one handle sees a mutation made through
/// any of them on the next read. Cloning the handle shares; use
/// [`MaterialHandle::detached`] for an independent copy.
#[derive(Debug, Clone)]
pub struct MaterialHandle(Rc<RefCell<MaterialSpec>>);

impl MaterialHandle {
    pub fn new(spec: MaterialSpec) -> Self {
        Self(Rc::new(RefCell::new(spec)))
    }

    pub fn spec(&self) -> Ref<'_, MaterialSpec> {
        self.0.borrow()
    }

    pub fn color(&self) -> Color {
        self.0.borrow().color
    }

    pub fn roughness(&self) -> f32 {
        self.0.borrow().roughness
    }

    pub fn set_color(&self, color: Color) {
        self.0.borrow_mut().color = color;
    }

    pub fn set_roughness(&self, roughness: f32) -> SceneResult<()> {
        let checked = MaterialSpec::new(self.color(), roughness)?;
        *self.0.borrow_mut() = checked;
        Ok(())
    }

    /// New handle holding a copy of the current values.
    pub fn detached(&self) -> Self {
        Self::new(*self.spec())
    }

    /// Whether both handles refer to the same material.
    pub fn ptr_eq(&self, other: &MaterialHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of handles currently sharing this material.
    pub fn share_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }
}

impl From<MaterialSpec> for MaterialHandle {
    fn from(spec: MaterialSpec) -> Self {
        Self::new(spec)
    }
}
