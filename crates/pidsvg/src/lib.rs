// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`pidsvg` converts [Proteus] P&ID documents into SVG.

Proteus (DEXPI) is an XML exchange format for piping and instrumentation diagrams.
`pidsvg` parses such a document, resolves all the drawing-related data
and presents it as a simple, strongly-typed scene tree,
which can then be written out as SVG.

## Features

- Source units (mm, cm, m, in, ft) are converted into millimeters
- The Y-up source frame is flipped into the Y-down SVG frame
- Presentation colors, line weights and line types are resolved
- Shape catalog templates are placed, rotated and scaled at each reference
- Recursive catalog references are detected and skipped
- Plant structure is preserved as nested groups with element metadata
- Optional bounding box overlays, background and millimeter grid

## Limitations

- Ellipses and B-spline curves are not supported
- Only the drawing is converted, plant data like connections or
  generic attributes are ignored

[Proteus]: https://www.dexpi.org/
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(missing_copy_implementations)]

mod geom;
mod parser;
mod tree;
mod writer;

pub use geom::*;
pub use parser::*;
pub use tree::*;
pub use writer::WriteOptions;

pub use pidtree;
pub use roxmltree;
pub use xmlwriter::Indent;
