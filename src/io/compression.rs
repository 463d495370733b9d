#[cfg(feature = "compression")]
mod inner {
    use std::fs::File;
    use std::io::Read;
    use std::path::Path;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Compression {
        None,
        Gz,
    }

    impl Compression {
        pub fn name(&self) -> &str {
            match self {
                Compression::None => "none",
                Compression::Gz => "gzip",
            }
        }

        /// Guesses the compression from the file extension.
        pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
            match path
                .as_ref()
                .extension()
                .and_then(|ext| ext.to_str())
            {
                Some(ext) if ext.eq_ignore_ascii_case("gz") => Compression::Gz,
                _ => Compression::None,
            }
        }

        pub fn get_decoder(
            &self,
            handle: File,
        ) -> anyhow::Result<Box<dyn Read>> {
            let decoder: Box<dyn Read> = match self {
                // Multi-member archives are common for bgzipped annotations
                Compression::Gz => Box::new(flate2::read::MultiGzDecoder::new(handle)),
                Compression::None => Box::new(handle),
            };
            Ok(decoder)
        }
    }
}

#[cfg(feature = "compression")]
pub use inner::*;
