/// Usage line printed on argument errors.
pub(crate) const USAGE: &str = "Usage: lpc-bb-test [OPTIONS] INPUT OUTPUT\n";

/// Help text for `--help`.
pub(crate) const HELP_TEXT: &str = concat!(
    "lpc-bb-test ",
    env!("CARGO_PKG_VERSION"),
    "\n",
    "Conformance harness for the LPC bus stream devices.\n",
    "\n",
    "Usage: lpc-bb-test [OPTIONS] INPUT OUTPUT\n",
    "\n",
    "INPUT is the device node the bus delivers data on; OUTPUT is the node\n",
    "written to the bus. Every selected probe runs even after a failure.\n",
    "\n",
    "Options:\n",
    "  -v, --verbose            Increase log verbosity (repeatable).\n",
    "      --debug=FLAG[N]      Set one log category: probe, transfer, device,\n",
    "                           pacing, summary, or all (repeatable).\n",
    "      --probe=NAME         Run only the named probe (repeatable).\n",
    "      --skip=NAME          Do not run the named probe (repeatable).\n",
    "      --list               List available probes and exit.\n",
    "      --interactive        Wait for Enter before each probe.\n",
    "      --strict             Treat inconclusive probes as failures.\n",
    "      --large-write-size=SIZE\n",
    "                           Bytes per bulk write (default 1M).\n",
    "      --write-ceiling=SIZE Stop bulk writes after SIZE bytes (default 1G).\n",
    "  -h, --help               Show this help message and exit.\n",
    "  -V, --version            Output version information and exit.\n",
    "\n",
    "SIZE accepts an optional K, M, or G suffix (powers of 1024).\n",
    "Exit status is 0 when no probe failed and 1 otherwise.\n",
);

/// Banner for `--version`.
pub(crate) const VERSION_TEXT: &str = concat!("lpc-bb-test ", env!("CARGO_PKG_VERSION"), "\n");
