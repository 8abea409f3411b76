use clap::Parser;
use clap::ValueEnum;
use quad_hash::HashMap;
use quad_hash::digest::FoldHashProvider;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Keys {
    /// Consecutive integers with the identity digest.
    Sequential,
    /// Strings `key_0`, `key_1`, ... with the rolling string digest.
    Strings,
    /// Consecutive integers with a foldhash digest.
    Foldhash,
}

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "target_capacity", default_value_t = 1000)]
    target_capacity: usize,

    /// Number of keys to insert. Defaults to the largest count that fits
    /// without a grow rebuild.
    #[arg(short = 'n', long = "count")]
    count: Option<usize>,

    /// Remove every n-th key after filling, leaving tombstones (and possibly
    /// triggering shrink rebuilds).
    #[arg(short = 'r', long = "remove_every")]
    remove_every: Option<usize>,

    #[arg(short = 'k', long = "keys", value_enum, default_value_t = Keys::Sequential)]
    keys: Keys,
}

fn report<K, V, P>(map: &HashMap<K, V, P>) {
    println!("Inserted {} values into map", map.len());
    println!("Final capacity: {}", map.capacity());
    println!("Final load factor: {:.2}%", map.load_factor() * 100.0);

    map.probe_histogram().print();
    map.debug_stats().print();
}

fn main() {
    let args = Args::parse();

    println!(
        "Creating HashMap with target capacity: {}",
        args.target_capacity
    );

    let count = args
        .count
        .unwrap_or(args.target_capacity * 46 / 100 + 1);
    let keep = |i: usize| args.remove_every.is_none_or(|n| n == 0 || i % n != 0);

    println!("Filling map with {count} {:?} keys...", args.keys);

    match args.keys {
        Keys::Sequential => {
            let mut map = HashMap::with_capacity(args.target_capacity);
            for i in 0..count {
                map.put(i as u64, i);
            }
            for i in (0..count).filter(|&i| !keep(i)) {
                map.remove(&(i as u64));
            }
            report(&map);
        }
        Keys::Strings => {
            let mut map = HashMap::with_capacity(args.target_capacity);
            for i in 0..count {
                map.put(format!("key_{i}"), i);
            }
            for i in (0..count).filter(|&i| !keep(i)) {
                map.remove(format!("key_{i}").as_str());
            }
            report(&map);
        }
        Keys::Foldhash => {
            let mut map = HashMap::with_capacity_and_provider(
                args.target_capacity,
                FoldHashProvider::default(),
            );
            for i in 0..count {
                map.put(i as u64, i);
            }
            for i in (0..count).filter(|&i| !keep(i)) {
                map.remove(&(i as u64));
            }
            report(&map);
        }
    }
}
