#![allow(dead_code)]

use std::sync::Once;

/// Numeric encoding of a synthetic zone's nodal block.
#[derive(Clone, Copy)]
pub enum Encoding {
    F32,
    F64,
    I64,
}

impl Encoding {
    fn code(self) -> i32 {
        match self {
            Self::F32 => 1,
            Self::F64 => 2,
            Self::I64 => 3,
        }
    }
}

#[derive(Clone)]
pub struct SyntheticZone {
    pub name: String,
    pub nnodes: usize,
    pub nelements: usize,
    pub encoding: Encoding,
    /// Overrides the uniform format codes when set.
    pub format_codes: Option<Vec<i32>>,
    pub passive: Option<Vec<i32>>,
    pub variable_sharing: bool,
    pub negative_index: bool,
}

impl SyntheticZone {
    pub fn new(name: &str, nnodes: usize, nelements: usize) -> Self {
        Self {
            name: name.into(),
            nnodes,
            nelements,
            encoding: Encoding::F32,
            format_codes: None,
            passive: None,
            variable_sharing: false,
            negative_index: false,
        }
    }

    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Value written for variable `var` at node `node`.
    pub fn value(&self, var: usize, node: usize) -> f64 {
        (var * 1000 + node) as f64
    }
}

/// Assembles a complete Tecplot binary file in memory.
pub struct SyntheticFile {
    pub title: String,
    pub variables: Vec<String>,
    pub zones: Vec<SyntheticZone>,
    pub geometry: bool,
}

impl SyntheticFile {
    /// Thirteen variables: x, y, z and ten results.
    pub fn new(zones: Vec<SyntheticZone>) -> Self {
        let mut variables: Vec<String> = ["x", "y", "z"].iter().map(|s| s.to_string()).collect();
        variables.extend((0..10).map(|i| format!("result_{i}")));
        Self {
            title: "synthetic wing".into(),
            variables,
            zones,
            geometry: false,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut w = Writer::default();
        w.raw(b"#!TDV112");
        w.i32(1);
        w.i32(0);
        w.string(&self.title);
        w.i32(self.variables.len() as i32);
        for v in &self.variables {
            w.string(v);
        }

        for zone in &self.zones {
            w.f32(299.0);
            w.string(&zone.name);
            w.i32(-1);
            w.i32(-1);
            w.f64(0.0);
            w.i32(-1);
            w.i32(3);
            w.i32(0);
            w.i32(0);
            w.i32(0);
            w.i32(zone.nnodes as i32);
            w.i32(zone.nelements as i32);
            w.i32(0);
            w.i32(0);
            w.i32(0);
            w.i32(0);
        }

        if self.geometry {
            w.f32(299.0);
            for v in [0, 0, 0] {
                w.i32(v);
            }
            for v in [1.0, 2.0, 3.0] {
                w.f64(v);
            }
            for v in [0, 1, 2, 0, 3, 0] {
                w.i32(v);
            }
            w.f64(0.1);
        } else {
            w.f32(357.0);
        }

        let nvars = self.variables.len();
        for zone in &self.zones {
            w.f32(299.0);
            let codes = zone
                .format_codes
                .clone()
                .unwrap_or_else(|| vec![zone.encoding.code(); nvars]);
            for c in codes {
                w.i32(c);
            }
            match &zone.passive {
                Some(flags) => {
                    w.i32(1);
                    for &f in flags {
                        w.i32(f);
                    }
                }
                None => w.i32(0),
            }
            w.i32(zone.variable_sharing as i32);
            w.i32(-1);

            for var in 0..nvars {
                w.f64(zone.value(var, 0));
            }
            for var in 0..nvars {
                w.f64(zone.value(var, zone.nnodes.saturating_sub(1)));
            }
            for var in 0..nvars {
                for node in 0..zone.nnodes {
                    let v = zone.value(var, node);
                    match zone.encoding {
                        Encoding::F32 => w.f32(v as f32),
                        Encoding::F64 => w.f64(v),
                        Encoding::I64 => w.i64(v as i64),
                    }
                }
            }
            for e in 0..zone.nelements {
                for k in 0..4 {
                    let node = ((e + k) % zone.nnodes.max(1)) as i32;
                    w.i32(if zone.negative_index && e == 0 && k == 0 { -1 } else { node });
                }
            }
        }
        w.0
    }
}

#[derive(Default)]
struct Writer(Vec<u8>);

impl Writer {
    fn raw(&mut self, b: &[u8]) {
        self.0.extend_from_slice(b);
    }
    fn i32(&mut self, v: i32) {
        self.raw(&v.to_le_bytes());
    }
    fn i64(&mut self, v: i64) {
        self.raw(&v.to_le_bytes());
    }
    fn f32(&mut self, v: f32) {
        self.raw(&v.to_le_bytes());
    }
    fn f64(&mut self, v: f64) {
        self.raw(&v.to_le_bytes());
    }
    fn string(&mut self, s: &str) {
        for c in s.chars() {
            self.i32(c as i32);
        }
        self.i32(0);
    }
}

static INIT: Once = Once::new();

/// Route decoder logs through the test harness.
pub fn init_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    });
}
