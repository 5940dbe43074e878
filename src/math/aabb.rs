use glam::{Mat4, Vec3};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box of the given size centred on the origin.
    pub fn from_extents(extents: Vec3) -> Self {
        let half = extents * 0.5;
        Self::new(-half, half)
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }

    /// Axis-aligned box enclosing this box after transformation.
    pub fn transformed(&self, matrix: Mat4) -> Aabb {
        let corners = self.corners().map(|c| matrix.transform_point3(c));
        let first = Aabb::new(corners[0], corners[0]);
        corners[1..]
            .iter()
            .fold(first, |acc, &c| acc.union(&Aabb::new(c, c)))
    }

    /// Whether `other`'s footprint on the ground (XZ) plane lies inside this one.
    pub fn contains_xz(&self, other: &Aabb) -> bool {
        other.min.x >= self.min.x
            && other.max.x <= self.max.x
            && other.min.z >= self.min.z
            && other.max.z <= self.max.z
    }
}
