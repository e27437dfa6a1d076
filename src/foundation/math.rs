/// FNV-1a, 64-bit.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new_default() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

/// Hue, saturation and value, each in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Hsv {
    pub(crate) h: f64,
    pub(crate) s: f64,
    pub(crate) v: f64,
}

pub(crate) fn rgb_to_hsv(channels: [u8; 3]) -> Hsv {
    let [r, g, b] = channels.map(|c| f64::from(c) / 255.0);
    let maxc = r.max(g).max(b);
    let minc = r.min(g).min(b);
    if minc == maxc {
        return Hsv {
            h: 0.0,
            s: 0.0,
            v: maxc,
        };
    }

    let span = maxc - minc;
    let rc = (maxc - r) / span;
    let gc = (maxc - g) / span;
    let bc = (maxc - b) / span;
    let h = if r == maxc {
        bc - gc
    } else if g == maxc {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };

    Hsv {
        h: (h / 6.0).rem_euclid(1.0),
        s: span / maxc,
        v: maxc,
    }
}

pub(crate) fn hsv_to_rgb(hsv: Hsv) -> [u8; 3] {
    let Hsv { h, s, v } = hsv;
    let (r, g, b) = if s == 0.0 {
        (v, v, v)
    } else {
        let sector = (h * 6.0).floor();
        let f = h * 6.0 - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        match (sector as i64).rem_euclid(6) {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        }
    };

    [r, g, b].map(unit_to_channel)
}

pub(crate) fn unit_to_channel(x: f64) -> u8 {
    (x * 255.0).round_ties_even().clamp(0.0, 255.0) as u8
}

/// `true` when `a` and `b` agree to a relative tolerance of 1e-9.
pub(crate) fn is_close(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() <= 1e-9 * a.abs().max(b.abs())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
