use blake3::Hasher;
use crate::types::Vec3;

/// Running blake3 digest over controller state, little-endian field by field.
pub struct StateHasher(Hasher);

impl StateHasher {
    pub fn new() -> Self { StateHasher(Hasher::new()) }
    pub fn update_bytes(&mut self, bytes: &[u8]) { self.0.update(bytes); }
    pub fn update_f32(&mut self, x: f32) { self.0.update(&x.to_le_bytes()); }
    pub fn update_u64(&mut self, x: u64) { self.0.update(&x.to_le_bytes()); }
    pub fn finalize(self) -> [u8; 32] { *self.0.finalize().as_bytes() }
}

impl Default for StateHasher {
    fn default() -> Self { Self::new() }
}

#[inline]
pub fn hash_vec3(h: &mut StateHasher, v: &Vec3) {
    for c in [v.x, v.y, v.z] { h.update_f32(c); }
}
