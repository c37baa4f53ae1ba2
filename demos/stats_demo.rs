use chain_hash::Chain;
use chain_hash::HashTable;
use chain_hash::LinkedChain;
use chain_hash::TableConfig;
use chain_hash::VecChain;
use chain_hash::hasher::CharCodeSum;
use chain_hash::hasher::FoldKeyHasher;
use chain_hash::hasher::KeyHasher;
use clap::Parser;
use clap::ValueEnum;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum HasherKind {
    CharSum,
    Fold,
}

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'n', long = "entries", default_value_t = 1000)]
    entries: usize,

    #[arg(short = 'b', long = "buckets", default_value_t = 16)]
    buckets: usize,

    #[arg(short = 'l', long = "load_factor", default_value_t = 0.75)]
    load_factor: f64,

    #[arg(long = "hasher", value_enum, default_value_t = HasherKind::CharSum)]
    hasher: HasherKind,

    /// Store buckets as singly-linked lists instead of vectors.
    #[arg(long = "linked")]
    linked: bool,
}

fn run<S, C>(args: &Args, hasher: S)
where
    S: KeyHasher,
    C: Chain<usize>,
{
    let config = TableConfig::new()
        .bucket_count(args.buckets)
        .load_factor(args.load_factor);
    let mut table: HashTable<usize, S, C> = match HashTable::with_config_and_hasher(config, hasher) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            std::process::exit(2);
        }
    };

    println!(
        "Filling table ({} buckets, load factor {}) with {} keys...",
        table.bucket_count(),
        table.load_factor(),
        args.entries
    );

    for i in 0..args.entries {
        table.set(format!("key{i}"), i);
    }

    println!("Inserted {} keys into {} buckets", table.len(), table.bucket_count());

    table.print_chain_histogram();
    table.debug_stats().print();
}

fn main() {
    let args = Args::parse();

    match (args.hasher, args.linked) {
        (HasherKind::CharSum, false) => run::<_, VecChain<usize>>(&args, CharCodeSum),
        (HasherKind::CharSum, true) => run::<_, LinkedChain<usize>>(&args, CharCodeSum),
        (HasherKind::Fold, false) => run::<_, VecChain<usize>>(&args, FoldKeyHasher::default()),
        (HasherKind::Fold, true) => run::<_, LinkedChain<usize>>(&args, FoldKeyHasher::default()),
    }
}
