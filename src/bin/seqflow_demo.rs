//! Runs every seqflow operation over the dataset 1..=10 and prints the results.
//!
//! Run with: cargo run --bin seqflow_demo [config.toml]
//! Set RUST_LOG=seqflow=debug to watch the stream workers.

use colored::Colorize;
use std::env;
use std::fmt::Debug;
use std::process;

use seqflow::{
    filter, filter_stream, foldl, foldr, from_stream, map, map_stream, remove, remove_stream,
    reverse, take, Config, Executor,
};
use tracing_subscriber::EnvFilter;

fn show(label: &str, value: impl Debug) {
    println!("{:<28} {:?}", label.cyan(), value);
}

fn run(executor: &Executor) -> seqflow::Result<()> {
    let t: Vec<i64> = (1..=10).collect();
    let double = |x: &i64| x * 2;
    let is_odd = |x: &i64| x % 2 != 0;

    println!("{}", "=== Sequences ===".bold());
    show("dataset", &t);
    show(
        "to/from channel",
        from_stream(&mut executor.to_stream(t.clone()))?,
    );
    show("array reverse", reverse(&t));
    show("array filter < 5", filter(|&x| x < 5, &t));
    show("array filter even", filter(|x| x % 2 == 0, &t));
    show("array remove even", remove(|x| x % 2 == 0, &t));
    show("array take 3", take(3, &t));
    show("array drop 3", seqflow::drop(3, &t));
    show("array map double", map(double, &t));
    show("array parallel map double", executor.pmap(double, &t));

    println!("\n{}", "=== Streams ===".bold());
    let doubled = map_stream(|x| x * 2, executor.to_stream(t.clone()));
    show("channel map double", doubled.collect()?);
    let odd = filter_stream(is_odd, executor.to_stream(t.clone()));
    show("channel filter odd", odd.collect()?);
    let even = remove_stream(is_odd, executor.to_stream(t.clone()));
    show("channel remove odd", even.collect()?);

    println!("\n{}", "=== Folds ===".bold());
    show("array foldl sum", foldl(|acc, &x| acc + x, 0i64, &t));
    show("array foldl sub", foldl(|acc, &x| acc - x, 0i64, &t));
    show("array foldl mult", foldl(|acc, &x| acc * x, 1i64, &t));
    show("array foldr sum", foldr(|&x, acc| x + acc, 0i64, &t));
    show("array foldr sub", foldr(|&x, acc| x - acc, 0i64, &t));
    show("array foldr mult", foldr(|&x, acc| x * acc, 1i64, &t));

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match env::args().nth(1) {
        Some(path) => Config::from_file(&path).unwrap_or_else(|err| {
            eprintln!("{} {}: {}", "error:".red().bold(), path, err);
            process::exit(2);
        }),
        None => Config::default(),
    };

    let result = Executor::new(config).and_then(|executor| run(&executor));
    if let Err(err) = result {
        eprintln!("{} {}", "error:".red().bold(), err);
        process::exit(1);
    }
}
