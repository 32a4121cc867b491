// src/write.rs

use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter, Serializer};
use std::{
    io::{self, Write},
    path::Path,
};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{ExportError, Result};

/// Wraps another formatter and writes every non-ASCII character (and DEL) as
/// `\uXXXX`, using a surrogate pair outside the BMP. Layout is left to `inner`.
pub struct AsciiEscaped<F> {
    inner: F,
}

impl<F> AsciiEscaped<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }
}

impl<F: Formatter> Formatter for AsciiEscaped<F> {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() && ch != '\x7f' {
                continue;
            }
            writer.write_all(fragment[start..i].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_key(writer, first)
    }

    fn end_object_key<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object_key(writer)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object_value(writer)
    }
}

/// Serialize `names` as a JSON array indented by two spaces, no trailing newline.
pub fn encode_names(names: &[String], escape_non_ascii: bool) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let pretty = PrettyFormatter::with_indent(b"  ");
    let res = if escape_non_ascii {
        names.serialize(&mut Serializer::with_formatter(
            &mut buf,
            AsciiEscaped::new(pretty),
        ))
    } else {
        names.serialize(&mut Serializer::with_formatter(&mut buf, pretty))
    };
    res.map_err(ExportError::Encode)?;
    Ok(buf)
}

/// Replace `path` with `bytes`. The data goes to a temp file next to `path`
/// first and is renamed into place, so a failure leaves any old file intact.
/// The parent directory must already exist.
pub fn replace_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let write_err = |source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    debug!(tmp = %tmp.path().display(), "staging output");
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(write_err)?;
    }

    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Encode and write in one go.
pub fn write_names(path: &Path, names: &[String], escape_non_ascii: bool) -> Result<()> {
    let bytes = encode_names(names, escape_non_ascii)?;
    replace_file(path, &bytes)
}
