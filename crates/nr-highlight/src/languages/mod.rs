//! Language loaders.
//!
//! Each loader installs one grammar. Languages the engine bundles are
//! registered as aliases of the bundled syntax; the rest ship as embedded
//! sublime-syntax files.

use crate::registry::{GrammarEngine, LoaderFn, PLAIN, PLAIN_TEXT_SYNTAX};

const DART: &str = include_str!("dart.sublime-syntax");
const ELIXIR: &str = include_str!("elixir.sublime-syntax");
const KOTLIN: &str = include_str!("kotlin.sublime-syntax");
const TYPESCRIPT: &str = include_str!("typescript.sublime-syntax");

/// Loaders applied by [`GrammarRegistry::with_defaults`](crate::GrammarRegistry::with_defaults).
///
/// The base block (plain through javascript) matches what a Prism core build
/// highlights without extra components.
pub const DEFAULT_LOADERS: &[LoaderFn] = &[
    load_plain,
    load_markup,
    load_css,
    load_clike,
    load_javascript,
    load_dart,
    load_typescript,
    load_elixir,
    load_go,
    load_java,
    load_kotlin,
    load_markdown,
    load_python,
    load_sql,
];

/// Plain text, used for every unknown language.
pub fn load_plain(engine: &mut GrammarEngine) {
    engine.ensure_plain_text().alias(PLAIN, PLAIN_TEXT_SYNTAX);
}

/// HTML and its Prism core aliases. XML gets its own grammar.
pub fn load_markup(engine: &mut GrammarEngine) {
    engine
        .alias("markup", "HTML")
        .alias_key("html", "markup")
        .alias_key("svg", "markup")
        .alias("xml", "XML");
}

pub fn load_css(engine: &mut GrammarEngine) {
    engine.alias("css", "CSS");
}

/// Generic C-family fallback.
pub fn load_clike(engine: &mut GrammarEngine) {
    engine.alias("clike", "C");
}

pub fn load_javascript(engine: &mut GrammarEngine) {
    engine.alias("javascript", "JavaScript").alias_key("js", "javascript");
}

pub fn load_dart(engine: &mut GrammarEngine) {
    engine.define("dart", DART);
}

pub fn load_typescript(engine: &mut GrammarEngine) {
    engine.define("typescript", TYPESCRIPT);
}

pub fn load_elixir(engine: &mut GrammarEngine) {
    engine.define("elixir", ELIXIR);
}

pub fn load_go(engine: &mut GrammarEngine) {
    engine.alias("go", "Go");
}

pub fn load_java(engine: &mut GrammarEngine) {
    engine.alias("java", "Java");
}

pub fn load_kotlin(engine: &mut GrammarEngine) {
    engine.define("kotlin", KOTLIN);
}

pub fn load_markdown(engine: &mut GrammarEngine) {
    engine.alias("markdown", "Markdown");
}

pub fn load_python(engine: &mut GrammarEngine) {
    engine.alias("python", "Python");
}

pub fn load_sql(engine: &mut GrammarEngine) {
    engine.alias("sql", "SQL");
}
