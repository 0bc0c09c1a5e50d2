use crate::Span;

/// The id of an input file, indexes into [`InputFiles`]
pub type CodeId = usize;

/// One source file that the checked trees were produced from
#[derive(Debug, Eq, PartialEq, Hash)]
pub struct Code {
    pub source: Box<str>,
    pub path: Option<Box<str>>,
}

/// A reference to a code file together with its global offset
#[derive(Debug, Clone, Copy)]
pub struct CodeRef<'a> {
    input_files: &'a InputFiles,
    file: CodeId,
}

impl<'a> CodeRef<'a> {
    pub fn id(self) -> CodeId {
        self.file
    }

    pub fn get_code(self) -> &'a Code {
        &self.input_files.input_files[self.file].0
    }

    pub fn get_offset(self) -> usize {
        self.input_files.input_files[self.file].1
    }

    /// Returns the span of the complete file
    pub fn get_span(self) -> Span {
        Span::new(self.get_offset(), self.get_code().source.len())
    }

    /// Converts a global span into a span relative to this file
    pub fn get_relative_span(self, span: Span) -> Span {
        span.relative_to(self.get_offset())
    }
}

/// Keeps track of every source file.
///
/// The files are laid out one after another in a single address space,
/// so that a [`Span`] alone identifies its file.
#[derive(Debug, Default)]
pub struct InputFiles {
    input_files: Vec<(Code, usize)>,
}

impl InputFiles {
    pub fn add_input(&mut self, code: Code) -> CodeId {
        let offset = self
            .input_files
            .last()
            .map_or(0, |(code, offset)| offset + code.source.len());
        self.input_files.push((code, offset));
        self.input_files.len() - 1
    }

    pub fn get_input(&self, id: CodeId) -> &Code {
        &self.input_files[id].0
    }

    pub fn get_code_ref(&self, id: CodeId) -> CodeRef<'_> {
        CodeRef {
            input_files: self,
            file: id,
        }
    }

    /// Returns the file which contains `span`, if any
    pub fn find_span_code(&self, span: Span) -> Option<CodeRef<'_>> {
        self.input_files
            .iter()
            .position(|(code, offset)| {
                *offset <= span.start() && span.end() <= offset + code.source.len()
            })
            .map(|file| self.get_code_ref(file))
    }

    /// Returns the source text of `span`, or an empty string if no file contains it
    pub fn get_span_str(&self, span: Span) -> &str {
        self.find_span_code(span)
            .and_then(|code| {
                let relative = code.get_relative_span(span);
                code.get_code().source.get(relative.start()..relative.end())
            })
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.input_files.is_empty()
    }
}
