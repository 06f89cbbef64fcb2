//! Binary entry point for the `lz4-cores` command-line tool.
//!
//! Prints the number of usable CPU cores on stdout. With `--cpuinfo PATH`
//! it also reports the hyperthreading fields parsed from a cpuinfo-format
//! file, which is how the Linux strategy's refinement step can be checked
//! against captured `/proc/cpuinfo` snapshots.

use anyhow::Context;
use clap::Parser;

use lz4_cores::cli::args::Args;
use lz4_cores::cli::constants::{set_display_level, AUTHOR, PROGRAM_NAME};
use lz4_cores::util::cores::{read_cpuinfo, HOST_STRATEGY};
use lz4_cores::util::{count_cores, count_cores_uncached};
use lz4_cores::{displaylevel, displayout};

fn run(args: Args) -> anyhow::Result<()> {
    displaylevel!(
        3,
        "*** {} v{} {}-bit, by {} ***\n",
        PROGRAM_NAME,
        lz4_cores::LZ4_VERSION_STRING,
        std::mem::size_of::<*const ()>() * 8,
        AUTHOR
    );
    displaylevel!(3, "strategy : {}\n", HOST_STRATEGY);

    if let Some(path) = args.cpuinfo.as_deref() {
        let info = read_cpuinfo(path)
            .with_context(|| format!("can't parse cpuinfo file {}", path.display()))?;
        displayout!("siblings  : {}\n", info.siblings);
        displayout!("cpu cores : {}\n", info.cpu_cores);
        displayout!("ratio     : {}\n", info.ratio());
    }

    let cores = if args.uncached {
        count_cores_uncached()
    } else {
        count_cores()
    };
    displayout!("{}\n", cores);
    Ok(())
}

fn main() {
    let args = Args::parse();
    set_display_level(args.display_level());

    if let Err(e) = run(args) {
        displaylevel!(1, "{}: {:#}\n", PROGRAM_NAME, e);
        std::process::exit(1);
    }
}
