// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// Processing options.
#[derive(Clone, Copy, Default, Debug)]
pub struct Options {
    /// Adds a bounding box overlay for each element that has an `Extent`.
    ///
    /// Default: false
    pub debug: bool,

    /// Fills the canvas with the `Drawing` presentation color.
    ///
    /// Default: false
    pub background: bool,
}
