// Copyright (c) 2024 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See acoompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Serializador de IDF (C1, §4.1): convierte una secuencia de [`IdfObject`]
//! en el texto posicional exacto que exige EnergyPlus 24.2.
//!
//! El orden de salida es estable (§4.1 "ordering by object kind, then by
//! insertion order within kind"): los objetos se agrupan por `kind()`
//! conservando el orden en que cada tipo aparece por primera vez, y dentro
//! de cada grupo se mantiene el orden de inserción original. Nunca se
//! reordenan campos ni se reescribe el valor que ya decidió cada variante.

use indexmap::IndexMap;

use super::objects::IdfObject;

const MAX_LINE_COMMENT_COLUMN: usize = 29;

/// Serializa `objects` al formato de texto IDF completo, agrupado por tipo
/// de objeto. Determinista: la misma secuencia de entrada siempre produce el
/// mismo texto, byte a byte.
pub fn emit(objects: &[IdfObject]) -> String {
    let mut groups: IndexMap<&'static str, Vec<&IdfObject>> = IndexMap::new();
    for obj in objects {
        groups.entry(obj.kind()).or_default().push(obj);
    }

    let mut out = String::new();
    for (kind, objs) in groups {
        for obj in objs {
            out.push_str(&emit_one(kind, obj));
            out.push('\n');
        }
    }
    out
}

fn emit_one(kind: &str, obj: &IdfObject) -> String {
    let fields = obj.fields();
    let mut out = String::new();
    out.push_str(kind);
    if fields.is_empty() {
        out.push_str(";\n");
        return out;
    }
    out.push_str(",\n");
    let last = fields.len() - 1;
    for (i, field) in fields.iter().enumerate() {
        let terminator = if i == last { ';' } else { ',' };
        let prefix = format!("    {}{}", field.value, terminator);
        let padding = if prefix.len() < MAX_LINE_COMMENT_COLUMN {
            " ".repeat(MAX_LINE_COMMENT_COLUMN - prefix.len())
        } else {
            " ".to_string()
        };
        out.push_str(&prefix);
        out.push_str(&padding);
        out.push_str("!- ");
        out.push_str(field.comment);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::objects::{Num, Version, Zone as ZoneObj};

    #[test]
    fn emits_trailing_semicolon_on_last_field() {
        let text = emit(&[IdfObject::Version(Version { version_identifier: "24.2".into() })]);
        assert!(text.contains("Version,\n"));
        assert!(text.trim_end().ends_with("!- Version Identifier"));
        assert!(text.contains("24.2;"));
    }

    #[test]
    fn groups_by_kind_preserving_first_appearance_order() {
        let objects = vec![
            IdfObject::Zone(ZoneObj {
                name: "Z1".into(),
                direction_of_relative_north_deg: 0.0,
                x_origin: 0.0,
                y_origin: 0.0,
                z_origin: 0.0,
                ceiling_height_m: Num::Value(3.0),
                volume_m3: Num::Autosize,
                floor_area_m2: Num::Blank,
            }),
            IdfObject::Version(Version { version_identifier: "24.2".into() }),
            IdfObject::Zone(ZoneObj {
                name: "Z2".into(),
                direction_of_relative_north_deg: 0.0,
                x_origin: 0.0,
                y_origin: 0.0,
                z_origin: 0.0,
                ceiling_height_m: Num::Value(3.0),
                volume_m3: Num::Autosize,
                floor_area_m2: Num::Blank,
            }),
        ];
        let text = emit(&objects);
        let zone_pos = text.find("Zone,").unwrap();
        let version_pos = text.find("Version,").unwrap();
        assert!(zone_pos < version_pos);
        assert!(text.matches("Zone,").count() == 2);
        assert!(text.find("Z1").unwrap() < text.find("Z2").unwrap());
    }

    #[test]
    fn empty_input_produces_empty_output() {
        assert_eq!(emit(&[]), "");
    }
}
