// VCD import
//
// A VCD load fills the document's signal library, not the visible list:
// the visible signals are cleared and the user then picks signals from the
// library (see `WaveDocument::add_signal_from_vcd`).

pub mod hierarchy;
pub mod parser;

pub use hierarchy::ScopeNode;
pub use parser::{MAX_DECODED_WIDTH, VcdError, VcdImporter, VcdLibrary};

use crate::document::{DocumentContents, WaveDocument};
use std::path::Path;

impl WaveDocument {
    /// Replace the VCD library with the contents of a dump file
    ///
    /// On success the visible signals and arrows are cleared and the sample
    /// count follows the dump. Nothing changes on failure. No undo step is
    /// recorded.
    pub fn load_vcd<P: AsRef<Path>>(&mut self, path: P) -> Result<(), VcdError> {
        let library = VcdImporter::new(self.config().vcd.clone()).load_file(path)?;
        self.install_vcd_library(library);
        Ok(())
    }

    /// Same as [`load_vcd`](Self::load_vcd) for in-memory text
    pub fn load_vcd_str(&mut self, text: &str) -> Result<(), VcdError> {
        let library = VcdImporter::new(self.config().vcd.clone()).parse_str(text)?;
        self.install_vcd_library(library);
        Ok(())
    }

    pub fn install_vcd_library(&mut self, library: VcdLibrary) {
        let markers = self.marker_list().to_vec();
        self.replace_contents(DocumentContents {
            sample_count: library.sample_count,
            signals: Vec::new(),
            vcd_signals: library.signals,
            markers,
        });
    }
}
