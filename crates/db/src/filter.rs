//! Builder for REST resource paths with filter expressions.
//!
//! ```
//! use nodeloom_db::filter::Resource;
//!
//! let path = Resource::table("nodes")
//!     .eq("id", "a1")
//!     .eq("workspace_id", "w9")
//!     .path();
//! assert_eq!(path, "nodes?id=eq.a1&workspace_id=eq.w9");
//! ```

use std::fmt;

use url::form_urlencoded;

/// Characters that end a value inside an `or=(...)` group unless quoted.
const GROUP_RESERVED: &[char] = &[',', '.', ':', '(', ')', '"'];

/// A table name plus the equality conditions that scope a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    table: &'static str,
    conditions: Vec<String>,
}

impl Resource {
    pub fn table(table: &'static str) -> Self {
        Self {
            table,
            conditions: Vec::new(),
        }
    }

    /// Add `column=eq.value`. Conditions are combined with AND.
    pub fn eq(mut self, column: &str, value: impl fmt::Display) -> Self {
        let value = encode(&value.to_string());
        self.conditions.push(format!("{column}=eq.{value}"));
        self
    }

    /// Add `or=(c1.eq.value,c2.eq.value)`: matches rows where any column equals `value`.
    pub fn any_eq(mut self, columns: &[&str], value: impl fmt::Display) -> Self {
        let value = group_value(&value.to_string());
        let alternatives: Vec<String> = columns
            .iter()
            .map(|column| format!("{column}.eq.{value}"))
            .collect();
        self.conditions
            .push(format!("or=({})", alternatives.join(",")));
        self
    }

    /// Render the resource path handed to the gateway.
    pub fn path(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table)?;
        if !self.conditions.is_empty() {
            write!(f, "?{}", self.conditions.join("&"))?;
        }
        Ok(())
    }
}

/// Quote values that would otherwise be split by the `or` group syntax.
fn group_value(raw: &str) -> String {
    if raw.contains(GROUP_RESERVED) {
        let escaped = raw.replace('\\', "\\\\").replace('"', "\\\"");
        encode(&format!("\"{escaped}\""))
    } else {
        encode(raw)
    }
}

/// Form-encode a filter value so it survives as one query parameter.
fn encode(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}
