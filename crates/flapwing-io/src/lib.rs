use anyhow::{anyhow, Context, Result};
use blake3::Hasher;
use serde_json::Value;
use std::{fmt, path::Path};
use flapwing_locomotion::LocomotionConfig;

/// Read a config from JSON. Missing fields take their defaults; the result is validated.
pub fn load_config(path: &Path) -> Result<LocomotionConfig> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let cfg: LocomotionConfig = serde_json::from_str(&s)
        .map_err(|e| anyhow!("{}: {}", path.display(), e))?;
    cfg.validate().with_context(|| format!("invalid config: {}", path.display()))?;
    Ok(cfg)
}

/// Write config to JSON at `out_path`. If `pretty=true`, pretty-print JSON.
pub fn write_config_json(cfg: &LocomotionConfig, out_path: &Path, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(cfg)?
    } else {
        serde_json::to_string(cfg)?
    };
    std::fs::write(out_path, json)
        .with_context(|| format!("failed to write config: {}", out_path.display()))?;
    Ok(())
}

/// Stable blake3 hash of the config's canonical (compact, field-ordered) JSON.
pub fn config_hash(cfg: &LocomotionConfig) -> Result<[u8; 32]> {
    let mut h = Hasher::new();
    h.update(b"FLAPCFGv1\0");
    h.update(&serde_json::to_vec(cfg)?);
    Ok(*h.finalize().as_bytes())
}

/// One field that differs between two configs.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDiff {
    pub field: String,
    pub left: Value,
    pub right: Value,
}

impl fmt::Display for FieldDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.left.as_f64(), self.right.as_f64()) {
            (Some(l), Some(r)) => write!(f, "{}: {} vs {} (|Δ| = {:.6})", self.field, l, r, (l - r).abs()),
            _ => write!(f, "{}: {} vs {}", self.field, self.left, self.right),
        }
    }
}

/// Field-level diff; numbers within `eps` (abs) count as equal. Nested blocks
/// are reported with dotted paths (`aero.wing_area`).
pub fn config_diff(a: &LocomotionConfig, b: &LocomotionConfig, eps: f64) -> Result<Vec<FieldDiff>> {
    let l = serde_json::to_value(a)?;
    let r = serde_json::to_value(b)?;
    let mut out = Vec::new();
    diff_values("", &l, &r, eps, &mut out);
    Ok(out)
}

fn diff_values(path: &str, l: &Value, r: &Value, eps: f64, out: &mut Vec<FieldDiff>) {
    match (l, r) {
        (Value::Object(lm), Value::Object(rm)) => {
            for (k, lv) in lm {
                let p = if path.is_empty() { k.clone() } else { format!("{path}.{k}") };
                diff_values(&p, lv, rm.get(k).unwrap_or(&Value::Null), eps, out);
            }
            for (k, rv) in rm.iter().filter(|(k, _)| !lm.contains_key(*k)) {
                let p = if path.is_empty() { k.clone() } else { format!("{path}.{k}") };
                out.push(FieldDiff { field: p, left: Value::Null, right: rv.clone() });
            }
        }
        (Value::Number(ln), Value::Number(rn)) => {
            let (x, y) = (ln.as_f64().unwrap_or(f64::NAN), rn.as_f64().unwrap_or(f64::NAN));
            if !((x - y).abs() <= eps) {
                out.push(FieldDiff { field: path.to_string(), left: l.clone(), right: r.clone() });
            }
        }
        _ if l != r => out.push(FieldDiff { field: path.to_string(), left: l.clone(), right: r.clone() }),
        _ => {}
    }
}

/// Utility: hex-encode a 32-byte hash.
pub fn hex32(x: [u8; 32]) -> String {
    let mut s = String::with_capacity(64);
    for b in &x {
        use std::fmt::Write;
        let _ = write!(s, "{:02x}", b);
    }
    s
}
