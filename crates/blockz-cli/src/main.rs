use anyhow::{Context, Result};
use blockz_config::Config;
use blockz_engine::{
    BlockContainerTemplate, BlockNode, BlockRenderer, IdGenerator, RenderError, RuleTables,
    global_counter, register_rule_overrides, rule_tables,
};
use serde::Deserialize;
use std::{
    env,
    path::{Path, PathBuf},
    process,
};

const USAGE: &str = "<blocks.json> [--config <path>] [--no-wrap]";

#[derive(Debug, PartialEq, Eq)]
struct Args {
    blocks_path: PathBuf,
    config_path: Option<PathBuf>,
    wrap: bool,
}

/// Parse everything after the program name. Paths get `~` and `$VAR` expanded.
fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut blocks_path = None;
    let mut config_path = None;
    let mut wrap = true;

    let mut args = args.iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--no-wrap" => wrap = false,
            "--config" => {
                let Some(path) = args.next() else {
                    return Err("--config needs a path".to_string());
                };
                config_path = Some(Config::expand_path(Path::new(path)));
            }
            flag if flag.starts_with("--") => return Err(format!("Unknown option '{flag}'")),
            path if blocks_path.is_none() => {
                blocks_path = Some(Config::expand_path(Path::new(path)));
            }
            extra => return Err(format!("Unexpected argument '{extra}'")),
        }
    }

    let Some(blocks_path) = blocks_path else {
        return Err("No block file provided".to_string());
    };
    Ok(Args {
        blocks_path,
        config_path,
        wrap,
    })
}

/// Block parser output: a whole document, or a single block.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BlockDocument {
    Blocks(Vec<BlockNode>),
    Block(BlockNode),
}

impl BlockDocument {
    fn into_blocks(self) -> Vec<BlockNode> {
        match self {
            Self::Blocks(blocks) => blocks,
            Self::Block(block) => vec![block],
        }
    }
}

fn parse_blocks(json: &str) -> serde_json::Result<Vec<BlockNode>> {
    serde_json::from_str::<BlockDocument>(json).map(BlockDocument::into_blocks)
}

fn render_document(
    blocks: &[BlockNode],
    config: &Config,
    rules: &RuleTables,
    ids: &dyn IdGenerator,
    wrap: bool,
) -> Result<String, RenderError> {
    let template = BlockContainerTemplate;
    let palette = config.palette();
    let block_types = config.block_types();
    let renderer = BlockRenderer::new(&template)
        .with_rules(rules)
        .with_ids(ids)
        .with_palette(&palette)
        .with_block_types(&block_types);

    renderer.render_blocks(blocks, wrap)
}

fn load_config(config_path: Option<&PathBuf>) -> Result<Config, String> {
    match config_path {
        Some(path) => match Config::load_from_path(path) {
            Ok(Some(config)) => Ok(config),
            Ok(None) => Err(format!("Config file '{}' not found", path.display())),
            Err(e) => Err(e.to_string()),
        },
        None => Config::load()
            .map(Option::unwrap_or_default)
            .map_err(|e| e.to_string()),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let argv: Vec<String> = env::args().collect();
    let program = argv.first().map(String::as_str).unwrap_or("blockz");
    let args = match parse_args(argv.get(1..).unwrap_or_default()) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("Error: {message}");
            eprintln!("Usage: {program} {USAGE}");
            process::exit(1);
        }
    };

    let config = match load_config(args.config_path.as_ref()) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("Error: Failed to load config file: {message}");
            process::exit(1);
        }
    };
    log::debug!("Loaded config: {config:?}");

    if !config.rules.is_empty() {
        register_rule_overrides(config.rules.clone()).context("Failed to register rule overrides")?;
    }

    let json = std::fs::read_to_string(&args.blocks_path)
        .with_context(|| format!("Failed to read '{}'", args.blocks_path.display()))?;
    let blocks = parse_blocks(&json)
        .with_context(|| format!("Failed to parse blocks in '{}'", args.blocks_path.display()))?;
    log::info!("Rendering {} top-level blocks", blocks.len());

    let html = render_document(&blocks, &config, rule_tables(), global_counter(), args.wrap)
        .context("Failed to render blocks")?;
    println!("{html}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockz_engine::BlockCounter;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    #[rstest]
    #[case(&["page.json"], "page.json", None, true)]
    #[case(&["page.json", "--no-wrap"], "page.json", None, false)]
    #[case(&["--config", "site.toml", "page.json"], "page.json", Some("site.toml"), true)]
    #[case(&["--no-wrap", "page.json", "--config", "site.toml"], "page.json", Some("site.toml"), false)]
    fn test_parse_args(
        #[case] argv: &[&str],
        #[case] blocks_path: &str,
        #[case] config_path: Option<&str>,
        #[case] wrap: bool,
    ) {
        let parsed = parse_args(&args(argv)).unwrap();

        assert_eq!(
            parsed,
            Args {
                blocks_path: PathBuf::from(blocks_path),
                config_path: config_path.map(PathBuf::from),
                wrap,
            }
        );
    }

    #[test]
    fn test_parse_args_expands_paths() {
        unsafe {
            env::set_var("BLOCKZ_CLI_TEST_SITE", "/srv/site");
        }

        let parsed = parse_args(&args(&[
            "$BLOCKZ_CLI_TEST_SITE/page.json",
            "--config",
            "$BLOCKZ_CLI_TEST_SITE/blockz.toml",
        ]))
        .unwrap();

        assert_eq!(parsed.blocks_path, PathBuf::from("/srv/site/page.json"));
        assert_eq!(
            parsed.config_path,
            Some(PathBuf::from("/srv/site/blockz.toml"))
        );

        unsafe {
            env::remove_var("BLOCKZ_CLI_TEST_SITE");
        }
    }

    #[rstest]
    #[case(&[], "No block file provided")]
    #[case(&["page.json", "--config"], "--config needs a path")]
    #[case(&["page.json", "--verbose"], "Unknown option '--verbose'")]
    #[case(&["page.json", "other.json"], "Unexpected argument 'other.json'")]
    fn test_parse_args_usage_errors(#[case] argv: &[&str], #[case] message: &str) {
        assert_eq!(parse_args(&args(argv)), Err(message.to_string()));
    }

    #[test]
    fn test_parse_blocks_accepts_array_or_single_block() {
        let many = parse_blocks(r#"[{"blockName": "core/heading"}, {"blockName": null}]"#).unwrap();
        let one = parse_blocks(r#"{"blockName": "core/heading", "innerHTML": "<h2>T</h2>"}"#).unwrap();

        assert_eq!(many.len(), 2);
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].name(), Some("core/heading"));
    }

    #[test]
    fn test_parse_blocks_rejects_scalars() {
        assert!(parse_blocks("42").is_err());
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.toml");

        let err = load_config(Some(&path)).unwrap_err();

        assert!(err.ends_with("missing.toml' not found"));
    }

    #[test]
    fn test_render_document_with_config() {
        let config: Config = toml_config(
            r##"
[theme.colors]
primary = "#0e7490"

[rules.groups]
default_inner = "inner--prose"
no_wrap = ["core/html"]

[dynamic_blocks]
"core/latest-posts" = "<ul><li>News</li></ul>"
"##,
        );
        let rules = RuleTables::resolve(config.rules.clone());
        let ids = BlockCounter::new();
        let blocks = parse_blocks(
            r##"[
                {"blockName": "acf/banner", "attrs": {"data": {"block_background_color": "#0e7490"}},
                 "innerHTML": "<p>Hi</p>", "innerContent": ["<p>Hi</p>"]},
                {"blockName": null, "innerHTML": "\n\n", "innerContent": ["\n\n"]},
                {"blockName": "core/html", "innerHTML": "<hr>", "innerContent": ["<hr>"]},
                {"blockName": "core/latest-posts"}
            ]"##,
        )
        .unwrap();

        let html = render_document(&blocks, &config, &rules, &ids, true).unwrap();

        assert_eq!(
            html,
            concat!(
                r#"<section id="banner-1" class="block block-acf-banner bg-primary py-8 lg:py-12">"#,
                r#"<div class="inner--prose"><p>Hi</p></div></section>"#,
                "<hr>",
                r#"<section id="latest-posts-3" class="block block-core-latest-posts">"#,
                r#"<div class="inner--prose"><ul><li>News</li></ul></div></section>"#,
            )
        );
    }

    #[test]
    fn test_render_document_without_wrapping() {
        let config = Config::default();
        let rules = RuleTables::default();
        let ids = BlockCounter::new();
        let blocks = parse_blocks(
            r#"{"blockName": "core/group", "innerContent": ["<div>", null, "</div>"],
                "innerBlocks": [{"blockName": "core/paragraph", "innerHTML": "<p>A</p>", "innerContent": ["<p>A</p>"]}]}"#,
        )
        .unwrap();

        let html = render_document(&blocks, &config, &rules, &ids, false).unwrap();

        assert_eq!(html, "<div><p>A</p></div>");
    }

    fn toml_config(content: &str) -> Config {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, content).unwrap();
        load_config(Some(&path)).unwrap()
    }
}
