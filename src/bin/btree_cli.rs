//! Simple CLI for exercising the B-tree index.
//!
//! Usage:
//!   btree_cli [--degree <t>] [--config <file.json>] [--json] [ops...]
//!
//! Operations are applied in order to a fresh tree:
//!   insert <key>   - Insert a key
//!   delete <key>   - Delete a key
//!   search <key>   - Look up a key
//!   trace <key>    - Print the search path for a key
//!
//! Without operations the built-in demonstration runs.

use btree_index::{BTree, BTreeConfig, TreeError};
use log::info;
use std::env;
use std::fs;
use std::process::exit;

const DEMO_KEYS: [i64; 8] = [10, 20, 5, 6, 12, 30, 7, 17];

fn usage() -> ! {
    eprintln!("Usage: btree_cli [--degree <t>] [--config <file.json>] [--json] [ops...]");
    eprintln!("Operations:");
    eprintln!("  insert <key>  - Insert a key");
    eprintln!("  delete <key>  - Delete a key");
    eprintln!("  search <key>  - Look up a key");
    eprintln!("  trace <key>   - Print the search path for a key");
    exit(1);
}

enum Op {
    Insert(i64),
    Delete(i64),
    Search(i64),
    Trace(i64),
}

struct Options {
    config: BTreeConfig,
    json: bool,
    ops: Vec<Op>,
}

fn parse_key(raw: Option<&String>) -> i64 {
    match raw.map(|s| s.parse::<i64>()) {
        Some(Ok(key)) => key,
        Some(Err(_)) => {
            eprintln!("ERROR: Invalid key: {}", raw.map(String::as_str).unwrap_or_default());
            exit(1);
        }
        None => usage(),
    }
}

fn load_config(path: &str) -> BTreeConfig {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("ERROR: Failed to read config {}: {}", path, e);
            exit(1);
        }
    };
    match serde_json::from_str(&contents) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: Invalid config {}: {}", path, e);
            exit(1);
        }
    }
}

fn parse_args(args: &[String]) -> Options {
    let mut options = Options {
        config: BTreeConfig::default(),
        json: false,
        ops: Vec::new(),
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--degree" => {
                let degree = iter.next().and_then(|s| s.parse().ok());
                match degree {
                    Some(degree) => options.config = BTreeConfig::new(degree),
                    None => usage(),
                }
            }
            "--config" => match iter.next() {
                Some(path) => options.config = load_config(path),
                None => usage(),
            },
            "--json" => options.json = true,
            "insert" => options.ops.push(Op::Insert(parse_key(iter.next()))),
            "delete" => options.ops.push(Op::Delete(parse_key(iter.next()))),
            "search" => options.ops.push(Op::Search(parse_key(iter.next()))),
            "trace" => options.ops.push(Op::Trace(parse_key(iter.next()))),
            "-h" | "--help" => usage(),
            other => {
                eprintln!("Unknown command: {}", other);
                exit(1);
            }
        }
    }

    options
}

fn print_tree(tree: &BTree<i64>, json: bool) {
    println!("tree_height: {}", tree.height());
    if json {
        match serde_json::to_string_pretty(&tree.export()) {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => eprintln!("ERROR: {}", e),
        }
    } else {
        print!("{}", tree);
    }
}

fn report(label: &str, key: i64, result: Result<(), TreeError>) {
    match result {
        Ok(()) => println!("{} {}: OK", label, key),
        Err(e) => println!("{} {}: ERROR: {}", label, key, e),
    }
}

fn run_demo(tree: &mut BTree<i64>, json: bool) {
    for key in DEMO_KEYS {
        report("insert", key, tree.insert(key));
    }
    println!("\n[Initial state]");
    print_tree(tree, json);

    println!("\n[Delete 6]");
    report("delete", 6, tree.delete(&6));
    print_tree(tree, json);

    for key in [3, 25] {
        println!("\n[Insert {}]", key);
        report("insert", key, tree.insert(key));
        print_tree(tree, json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let options = parse_args(&args);

    let mut tree = match BTree::with_config(options.config.clone()) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            exit(1);
        }
    };
    info!("created tree with minimum degree {}", tree.min_degree());

    if options.ops.is_empty() {
        run_demo(&mut tree, options.json);
        return;
    }

    for op in &options.ops {
        match *op {
            Op::Insert(key) => report("insert", key, tree.insert(key)),
            Op::Delete(key) => report("delete", key, tree.delete(&key)),
            Op::Search(key) => match tree.search(&key) {
                Some(found) => println!("search {}: FOUND {}", key, found),
                None => println!("search {}: NOT_FOUND", key),
            },
            Op::Trace(key) => {
                for line in tree.trace_search(&key) {
                    println!("{}", line);
                }
            }
        }
    }

    print_tree(&tree, options.json);
}
