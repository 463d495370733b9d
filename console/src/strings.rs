macro_rules! define_strings {
    (
        $($name:ident = $value:literal);*$(;)?
    ) => {
        $(
            pub const $name: &str = $value;
        )*
    };
}

pub mod parse {
    define_strings! {
        FILE =
            "Path to the GTF file. Files ending in `.gz` are decompressed.";
        OUTPUT =
            "Path of the output file. Records are written to stdout when \
            omitted.";
        FORMAT =
            "Output format. `json` writes one record per line, `gtf` writes the \
            lines of every resolved feature back in GTF syntax.";
        BUFFER_SIZE =
            "Maximum number of top-level features held back waiting for \
            references. Features beyond it are written early, and later \
            references to them fail. Defaults to GTFSTREAM_BUFFER_SIZE or 1000.";
        DIRECTIVES = "Also output `##` directive records.";
        COMMENTS = "Also output `#` comment records.";
        NO_SEQUENCES = "Do not output sequences of the FASTA section.";
        ALL = "Output every kind of record.";
        NO_DERIVES =
            "Do not treat `Derives_from` as a reference. Derived features are \
            reported at top level instead.";
        REFERENCE_ATTRIBUTES =
            "Additional attributes whose values reference other feature ids. \
            Referencing features are nested under a container named after \
            the lower-cased attribute.";
    }
}

pub mod validate {
    define_strings! {
        FILE = "Path to the GTF file to check.";
    }
}
