//! Built-in block templates offered by the type-blocking panel.
//!
//! Workspace blocks only cover what the user has already placed. The
//! templates below make the language built-ins typeable from an empty
//! workspace. Some templates need more than a canonical type to be created
//! in a useful state: a dropdown default (`field -> value`) or mutator
//! attributes (`attribute -> value`).
//!
//! # Usage
//!
//! ```rust,ignore
//! use typeblock::catalog::builtin_templates;
//!
//! let forward = builtin_templates()
//!     .iter()
//!     .find(|t| t.label == "for each number")
//!     .unwrap();
//! assert_eq!(forward.canonical_type, "controls_forRange");
//! ```

use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// A creatable built-in block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinTemplate {
    /// Text the user types to find the block.
    pub label: String,
    /// Canonical block type.
    pub canonical_type: String,
    /// Palette the block lives in (e.g. `"Control"`, `"Math"`).
    pub palette: String,
    /// Dropdown default selected on creation.
    pub dropdown: IndexMap<String, String>,
    /// Mutator state applied on creation.
    pub mutator: IndexMap<String, String>,
}

impl BuiltinTemplate {
    fn dropdown(mut self, field: &str, value: &str) -> Self {
        self.dropdown.insert(field.to_string(), value.to_string());
        self
    }

    fn mutator(mut self, attribute: &str, value: &str) -> Self {
        self.mutator.insert(attribute.to_string(), value.to_string());
        self
    }
}

fn template(label: &str, canonical_type: &str, palette: &str) -> BuiltinTemplate {
    BuiltinTemplate {
        label: label.to_string(),
        canonical_type: canonical_type.to_string(),
        palette: palette.to_string(),
        dropdown: IndexMap::new(),
        mutator: IndexMap::new(),
    }
}

/// Returns all built-in templates.
///
/// Built on first access and cached for the lifetime of the process.
pub fn builtin_templates() -> &'static [BuiltinTemplate] {
    static TEMPLATES: Lazy<Vec<BuiltinTemplate>> = Lazy::new(build_templates);
    &TEMPLATES
}

fn build_templates() -> Vec<BuiltinTemplate> {
    let mut t = Vec::with_capacity(64);

    // ── Control ─────────────────────────────────────────────────────────
    let p = "Control";
    t.push(template("if", "controls_if", p));
    t.push(template("else if", "controls_if", p).mutator("elseif", "1"));
    t.push(template("else", "controls_if", p).mutator("else", "1"));
    t.push(template("for each number", "controls_forRange", p));
    t.push(template("for each item", "controls_forEach", p));
    t.push(template("while", "controls_while", p));
    t.push(template("choose", "controls_choose", p));
    t.push(template("do", "controls_do_then_return", p));
    t.push(template("evaluate but ignore", "controls_eval_but_ignore", p));
    t.push(template("open another screen", "controls_openAnotherScreen", p));
    t.push(template("close screen", "controls_closeScreen", p));
    t.push(template("close application", "controls_closeApplication", p));
    t.push(template("break", "controls_break", p));

    // ── Logic ───────────────────────────────────────────────────────────
    let p = "Logic";
    t.push(template("true", "logic_boolean", p).dropdown("BOOL", "TRUE"));
    t.push(template("false", "logic_boolean", p).dropdown("BOOL", "FALSE"));
    t.push(template("not", "logic_negate", p));
    t.push(template("and", "logic_operation", p).dropdown("OP", "AND"));
    t.push(template("or", "logic_operation", p).dropdown("OP", "OR"));
    t.push(template("=", "logic_compare", p).dropdown("OP", "EQ"));
    t.push(template("≠", "logic_compare", p).dropdown("OP", "NEQ"));

    // ── Math ────────────────────────────────────────────────────────────
    let p = "Math";
    t.push(template("0", "math_number", p));
    t.push(template("+", "math_add", p).mutator("items", "2"));
    t.push(template("-", "math_subtract", p));
    t.push(template("*", "math_multiply", p).mutator("items", "2"));
    t.push(template("/", "math_division", p));
    t.push(template("^", "math_power", p));
    t.push(template("<", "math_compare", p).dropdown("OP", "LT"));
    t.push(template(">", "math_compare", p).dropdown("OP", "GT"));
    t.push(template("random integer", "math_random_int", p));
    t.push(template("random fraction", "math_random_float", p));
    t.push(template("min", "math_on_list", p).dropdown("OP", "MIN").mutator("items", "2"));
    t.push(template("max", "math_on_list", p).dropdown("OP", "MAX").mutator("items", "2"));
    t.push(template("sqrt", "math_single", p).dropdown("OP", "ROOT"));
    t.push(template("absolute", "math_single", p).dropdown("OP", "ABS"));
    t.push(template("round", "math_round", p).dropdown("OP", "ROUND"));
    t.push(template("modulo of", "math_divide", p).dropdown("OP", "MODULO"));
    t.push(template("is number?", "math_is_a_number", p));

    // ── Text ────────────────────────────────────────────────────────────
    let p = "Text";
    t.push(template("Text", "text", p));
    t.push(template("join", "text_join", p).mutator("items", "2"));
    t.push(template("length", "text_length", p));
    t.push(template("is empty", "text_isEmpty", p));
    t.push(template("compare texts", "text_compare", p).dropdown("OP", "LT"));
    t.push(template("trim", "text_trim", p));
    t.push(template("upcase", "text_changeCase", p).dropdown("OP", "UPCASE"));
    t.push(template("downcase", "text_changeCase", p).dropdown("OP", "DOWNCASE"));
    t.push(template("contains", "text_contains", p));
    t.push(template("split", "text_split", p).dropdown("OP", "SPLIT"));
    t.push(template("segment", "text_segment", p));
    t.push(template("replace all", "text_replace_all", p));

    // ── Lists ───────────────────────────────────────────────────────────
    let p = "Lists";
    t.push(template("create empty list", "lists_create_with", p).mutator("items", "0"));
    t.push(template("make a list", "lists_create_with", p).mutator("items", "2"));
    t.push(template("add items to list", "lists_add_items", p).mutator("items", "1"));
    t.push(template("is in list?", "lists_is_in", p));
    t.push(template("length of list", "lists_length", p));
    t.push(template("is list empty?", "lists_is_empty", p));
    t.push(template("select list item", "lists_select_item", p));
    t.push(template("remove list item", "lists_remove_item", p));

    // ── Colors ──────────────────────────────────────────────────────────
    let p = "Colors";
    t.push(template("black", "color_black", p));
    t.push(template("white", "color_white", p));
    t.push(template("red", "color_red", p));
    t.push(template("green", "color_green", p));
    t.push(template("blue", "color_blue", p));
    t.push(template("make color", "color_make_color", p));

    // ── Variables & procedures ──────────────────────────────────────────
    t.push(template("initialize global", "global_declaration", "Variables"));
    t.push(template("initialize local", "local_declaration_statement", "Variables"));
    t.push(template("get", "lexical_variable_get", "Variables"));
    t.push(template("set", "lexical_variable_set", "Variables"));
    t.push(template("to procedure do", "procedures_defnoreturn", "Procedures"));
    t.push(template("to procedure result", "procedures_defreturn", "Procedures"));

    t
}
