use std::path::PathBuf;

use rst_table::error::Result;
use rst_table::write::{OutputFormat, RstWriterOptions};
use rst_table::{Dictionary, RstFile, RstWriter};
use tracing_test::traced_test;

fn resource(name: &str) -> PathBuf {
    PathBuf::from(format!(
        "{}/resources/{}",
        env!("CARGO_MANIFEST_DIR"),
        name
    ))
}

fn render(rst: &RstFile, dictionary: Option<&Dictionary>) -> Result<String> {
    let mut out = RstWriter::new(Vec::new(), RstWriterOptions::default());
    out.write(&rst.resolve(dictionary))?;
    Ok(String::from_utf8(out.into_inner()).expect("output is utf-8"))
}

#[traced_test]
#[test]
fn resolve_with_dictionary() -> Result<()> {
    let rst = RstFile::open(resource("hello_v3.rst"))?;
    let dictionary = Dictionary::open(resource("greeting.rst.txt"), rst.hash_bits())?;

    assert_eq!(render(&rst, Some(&dictionary))?, "tr \"Greeting\" = \"Hello\"\n");

    Ok(())
}

#[traced_test]
#[test]
fn resolve_without_dictionary() -> Result<()> {
    let rst = RstFile::open(resource("hello_v3.rst"))?;
    let dictionary = Dictionary::open_or_warn(resource("missing.rst.txt"), rst.hash_bits());

    assert!(dictionary.is_none());
    assert!(logs_contain("unable to load hash dictionary"));
    assert_eq!(render(&rst, dictionary.as_ref())?, "tr \"1\" = \"Hello\"\n");

    Ok(())
}

#[traced_test]
#[test]
fn resolve_mixed_dictionary() -> Result<()> {
    let rst = RstFile::open(resource("menu_v4.rst"))?;
    let dictionary = Dictionary::open(resource("hashes.rst.txt"), rst.hash_bits())?;
    assert_eq!(dictionary.len(), 5);

    assert_eq!(
        render(&rst, Some(&dictionary))?,
        concat!(
            "tr \"menu_play\" = \"Play\"\n",
            "tr \"menu_quit\" = \"Quit\"\n",
            "tr \"menu_options\" = \"Options\"\n",
            "tr \"4660\" = \"Unknown\"\n",
            "tr \"menu_start\" = \"Play\"\n",
        )
    );

    Ok(())
}

#[traced_test]
#[test]
fn hashes_depend_on_version() -> Result<()> {
    let v2 = RstFile::open(resource("menu_v2.rst"))?;
    let v5 = RstFile::open(resource("menu_v5.rst"))?;

    assert_eq!(
        render(&v2, None)?,
        concat!(
            "[Font]\nsize=12\n",
            "tr \"741054096432\" = \"Play\"\n",
            "tr \"1004028824357\" = \"Quit\"\n",
            "tr \"609461131041\" = \"Options\"\n",
            "tr \"4660\" = \"Unknown\"\n",
            "tr \"215375228268\" = \"Play\"\n",
        )
    );
    assert_eq!(
        render(&v5, None)?,
        concat!(
            "tr \"191298282544\" = \"Play\"\n",
            "tr \"454273010469\" = \"Quit\"\n",
            "tr \"59705317153\" = \"Options\"\n",
            "tr \"4660\" = \"Unknown\"\n",
            "tr \"215375228268\" = \"Play\"\n",
        )
    );

    // the same dictionary resolves both, once loaded for the right width
    let dictionary = Dictionary::open(resource("hashes.rst.txt"), v2.hash_bits())?;
    assert!(render(&v2, Some(&dictionary))?.contains("tr \"menu_quit\" = \"Quit\"\n"));

    Ok(())
}

#[traced_test]
#[test]
fn resolve_as_json() -> Result<()> {
    let rst = RstFile::open(resource("menu_v2.rst"))?;
    let dictionary = Dictionary::open(resource("hashes.rst.txt"), rst.hash_bits())?;

    let mut out = RstWriter::new(
        Vec::new(),
        RstWriterOptions::builder().format(OutputFormat::Json).build(),
    );
    out.write(&rst.resolve(Some(&dictionary)))?;

    let value: serde_json::Value = serde_json::from_slice(&out.into_inner())?;
    assert_eq!(value["version"], 2);
    assert_eq!(value["hash_bits"], 40);
    assert_eq!(value["font_config"], "[Font]\nsize=12\n");
    assert_eq!(value["entries"][1]["key"], "menu_quit");
    assert_eq!(value["entries"][3]["key"], "4660");
    assert_eq!(value["entries"][3]["hash"], 4660);
    assert_eq!(value["entries"][4]["value"], "Play");

    Ok(())
}
