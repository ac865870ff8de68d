use alloc::string::String;
use core::fmt::{self, Write};

use super::{Kind, Shape};
use crate::Signature;

impl Shape {
    /// Display name of the shape.
    ///
    /// Named shapes return their declared name. Unnamed shapes render a
    /// canonical spelling of their structure, except unnamed interfaces,
    /// which all resolve to `any`.
    pub fn name(&self) -> String {
        let mut out = String::new();
        // writing into a String cannot fail
        let _ = self.write_name(&mut out);
        out
    }

    /// Writes [`Shape::name`] into `w`.
    pub fn write_name(&self, w: &mut impl Write) -> fmt::Result {
        if let Some(name) = &self.type_identifier {
            return w.write_str(name);
        }

        match &self.kind {
            Kind::Bool => w.write_str("bool"),
            Kind::Signed { bits } => write!(w, "i{bits}"),
            Kind::Unsigned { bits } => write!(w, "u{bits}"),
            Kind::Float { bits } => write!(w, "f{bits}"),
            Kind::Complex { bits } => write!(w, "Complex<f{bits}>"),
            Kind::String => w.write_str("String"),
            Kind::Array { elem, len } => {
                w.write_char('[')?;
                elem.write_name(w)?;
                write!(w, "; {len}]")
            }
            Kind::Slice { elem } => {
                w.write_str("Vec<")?;
                elem.write_name(w)?;
                w.write_char('>')
            }
            Kind::Map { key, value } => {
                w.write_str("Map<")?;
                key.write_name(w)?;
                w.write_str(", ")?;
                value.write_name(w)?;
                w.write_char('>')
            }
            Kind::Pointer { pointee } => {
                w.write_char('*')?;
                pointee.write_name(w)
            }
            Kind::Struct(def) => {
                if def.fields.is_empty() {
                    return w.write_str("struct {}");
                }
                w.write_str("struct { ")?;
                for (i, field) in def.fields.iter().enumerate() {
                    if i > 0 {
                        w.write_str(", ")?;
                    }
                    write!(w, "{}: ", field.name)?;
                    field.shape.write_name(w)?;
                }
                w.write_str(" }")
            }
            Kind::Interface(_) => w.write_str("any"),
            Kind::Function(sig) => write_signature(sig, w),
        }
    }
}

fn write_signature(sig: &Signature, w: &mut impl Write) -> fmt::Result {
    w.write_str("fn(")?;
    let last = sig.params.len().saturating_sub(1);
    for (i, param) in sig.params.iter().enumerate() {
        if i > 0 {
            w.write_str(", ")?;
        }
        if sig.variadic && i == last {
            w.write_str("...")?;
        }
        param.write_name(w)?;
    }
    w.write_char(')')?;

    match sig.results.as_slice() {
        [] => Ok(()),
        [single] => {
            w.write_str(" -> ")?;
            single.write_name(w)
        }
        many => {
            w.write_str(" -> (")?;
            for (i, result) in many.iter().enumerate() {
                if i > 0 {
                    w.write_str(", ")?;
                }
                result.write_name(w)?;
            }
            w.write_char(')')
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_name(f)
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.debug_struct("Shape")
                .field("type_identifier", &self.type_identifier)
                .field("module_path", &self.module_path)
                .field("kind", &self.kind)
                .finish()
        } else {
            write!(f, "Shape({self})")
        }
    }
}
