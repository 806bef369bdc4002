//! Shared input generators for the benchmarks.
#![allow(dead_code)]

/// Generate an ACF-style manifest body with `entries` leaf pairs plus a few
/// nested blocks, roughly matching the shape of a real app manifest.
pub fn generate_manifest(entries: usize) -> String {
    let mut out = String::from("\"AppState\"\n{\n");
    for i in 0..entries {
        if i % 10 == 9 {
            out.push_str(&format!(
                "\t\"depot{}\"\n\t{{\n\t\t\"manifest\"\t\t\"{}\"\n\t\t\"size\"\t\t\"{}\"\n\t}}\n",
                i,
                i * 7919,
                i * 1024
            ));
        } else {
            out.push_str(&format!("\t\"key{}\"\t\t\"value {}\"\n", i, i));
        }
    }
    out.push_str("}\n");
    out
}

/// Generate an INI body with `sections` sections of `keys` pairs each,
/// sprinkled with comments and blank lines.
pub fn generate_ini(sections: usize, keys: usize) -> String {
    let mut out = String::from("; generated fixture\n\n");
    for s in 0..sections {
        out.push_str(&format!("[Section{}]\n", s));
        for k in 0..keys {
            out.push_str(&format!("Key{} = value{}\n", k, k));
        }
        out.push('\n');
    }
    out
}
