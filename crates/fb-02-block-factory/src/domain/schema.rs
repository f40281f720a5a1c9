//! # Schema Validation
//!
//! Checks a block against a declared shape and reports every problem as a
//! human-readable string. An empty list means the block conforms. Blocks
//! opt in to a registered schema with `state["$schema"]`.

use super::event_types::INSTANCE_ID;
use shared_types::{Block, Value};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// State field naming the schema a block claims to follow.
pub const SCHEMA_FIELD: &str = "$schema";

/// Expected JSON kind of a state field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Integer,
    Object,
    Array,
    Boolean,
}

impl FieldKind {
    fn name(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Integer => "integer",
            FieldKind::Object => "object",
            FieldKind::Array => "array",
            FieldKind::Boolean => "boolean",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match (self, value) {
            (FieldKind::String, Value::String(_)) => true,
            (FieldKind::Number, Value::Number(_)) => true,
            (FieldKind::Integer, Value::Number(n)) => n.fract() == 0.0,
            (FieldKind::Object, Value::Object(_)) => true,
            (FieldKind::Array, Value::Array(_)) => true,
            (FieldKind::Boolean, Value::Bool(_)) => true,
            _ => false,
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One field constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldRule {
    fn new(name: &str, kind: FieldKind, required: bool) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required,
        }
    }
}

/// A block shape.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SchemaDefinition {
    /// Block type the schema applies to. Empty matches any type.
    pub target_type: String,
    pub version: String,
    /// Checked in declaration order.
    pub fields: Vec<FieldRule>,
    /// Roles that must be present and non-empty.
    pub expected_refs: Vec<String>,
    /// Roles that may appear. Informational.
    pub optional_refs: Vec<String>,
    pub requires_instance_id: bool,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Built-in schemas keyed by `foodblock:<type>@<version>`.
pub fn core_schemas() -> &'static BTreeMap<String, SchemaDefinition> {
    static SCHEMAS: OnceLock<BTreeMap<String, SchemaDefinition>> = OnceLock::new();
    SCHEMAS.get_or_init(|| {
        use self::FieldKind as K;
        BTreeMap::from([
            (
                "foodblock:substance.product@1.0".to_string(),
                SchemaDefinition {
                    target_type: "substance.product".into(),
                    version: "1.0".into(),
                    fields: vec![
                        FieldRule::new("name", K::String, true),
                        FieldRule::new("price", K::Number, false),
                        FieldRule::new("unit", K::String, false),
                        FieldRule::new("weight", K::Object, false),
                        FieldRule::new("allergens", K::Object, false),
                        FieldRule::new("gtin", K::String, false),
                    ],
                    expected_refs: strings(&["seller"]),
                    optional_refs: strings(&["origin", "inputs", "certifications"]),
                    requires_instance_id: false,
                },
            ),
            (
                "foodblock:transfer.order@1.0".to_string(),
                SchemaDefinition {
                    target_type: "transfer.order".into(),
                    version: "1.0".into(),
                    fields: vec![
                        FieldRule::new(INSTANCE_ID, K::String, true),
                        FieldRule::new("quantity", K::Number, false),
                        FieldRule::new("unit", K::String, false),
                        FieldRule::new("total", K::Number, false),
                        FieldRule::new("payment_ref", K::String, false),
                    ],
                    expected_refs: strings(&["buyer", "seller"]),
                    optional_refs: strings(&["product", "agent"]),
                    requires_instance_id: true,
                },
            ),
            (
                "foodblock:observe.review@1.0".to_string(),
                SchemaDefinition {
                    target_type: "observe.review".into(),
                    version: "1.0".into(),
                    fields: vec![
                        FieldRule::new(INSTANCE_ID, K::String, true),
                        FieldRule::new("rating", K::Number, true),
                        FieldRule::new("text", K::String, false),
                    ],
                    expected_refs: strings(&["subject", "author"]),
                    optional_refs: Vec::new(),
                    requires_instance_id: true,
                },
            ),
        ])
    })
}

/// Validates against `schema`, or against the core schema the block names
/// in `state["$schema"]`.
pub fn validate(block: &Block, schema: Option<&SchemaDefinition>) -> Vec<String> {
    validate_with_registry(block, schema, core_schemas())
}

/// Like [`validate`], resolving `$schema` in a caller-supplied registry.
pub fn validate_with_registry(
    block: &Block,
    schema: Option<&SchemaDefinition>,
    registry: &BTreeMap<String, SchemaDefinition>,
) -> Vec<String> {
    let mut errors = Vec::new();
    if block.block_type.is_empty() {
        errors.push("Block must have type and state".to_string());
        return errors;
    }

    let schema = match schema {
        Some(schema) => schema,
        None => match block.state_str(SCHEMA_FIELD) {
            Some(reference) => match registry.get(reference) {
                Some(schema) => schema,
                None => {
                    errors.push(format!("Unknown schema: {reference}"));
                    return errors;
                }
            },
            None => return errors,
        },
    };

    if !schema.target_type.is_empty() && block.block_type != schema.target_type {
        errors.push(format!(
            "Type mismatch: block is {}, schema is for {}",
            block.block_type, schema.target_type
        ));
    }

    for rule in &schema.fields {
        match block.state.get(&rule.name) {
            None if rule.required => {
                errors.push(format!("Missing required field: state.{}", rule.name));
            }
            Some(value) if !rule.kind.accepts(value) => {
                errors.push(format!(
                    "Field state.{} should be {}, got {}",
                    rule.name,
                    rule.kind.name(),
                    kind_of(value)
                ));
            }
            _ => {}
        }
    }

    for role in &schema.expected_refs {
        let present = block
            .refs
            .get(role)
            .is_some_and(|target| target.first().is_some_and(|h| !h.is_empty()));
        if !present {
            errors.push(format!("Missing expected ref: refs.{role}"));
        }
    }

    let instance_rule_declared = schema.fields.iter().any(|r| r.name == INSTANCE_ID && r.required);
    if schema.requires_instance_id
        && !instance_rule_declared
        && !block.state.contains_key(INSTANCE_ID)
    {
        errors.push(format!("Missing required field: state.{INSTANCE_ID}"));
    }

    errors
}
