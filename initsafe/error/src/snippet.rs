//! Owned variants of the `annotate_snippets` library structs
use std::borrow::Cow;

use annotate_snippets::{
    display_list::FormatOptions,
    snippet::{Annotation, AnnotationType, Slice, Snippet, SourceAnnotation},
};

use initsafe_common::{CodeId, CompileContext, Span};

/// An owned counterpart to the `annotate_snippets::Snippet` struct
#[derive(Debug)]
pub struct SnippetOwned<'a> {
    pub title: Cow<'a, str>,
    pub id: Option<Cow<'a, str>>,
    pub annotation_type: AnnotationType,
    pub slices: Vec<SliceOwned<'a>>,
    pub footer: Vec<AnnotationOwned<'a>>,
}

/// An owned counterpart to the `annotate_snippets::Slice` struct
#[derive(Debug)]
pub struct SliceOwned<'a> {
    pub code_id: CodeId,
    pub source: &'a str,
    pub origin: Option<&'a str>,
    pub annotations: Vec<SourceAnnotationOwned>,
}

/// An owned counterpart to the `annotate_snippets::Annotation` struct
#[derive(Debug)]
pub struct AnnotationOwned<'a> {
    pub id: Option<Cow<'a, str>>,
    pub label: Option<Cow<'a, str>>,
    pub annotation_type: AnnotationType,
}

/// An owned counterpart to the `annotate_snippets::SourceAnnotation` struct
///
/// The range is relative to the source of the containing slice
#[derive(Debug)]
pub struct SourceAnnotationOwned {
    pub annotation_type: AnnotationType,
    pub range: Span,
    pub label: String,
}

impl SnippetOwned<'_> {
    pub fn as_snippet(&self) -> Snippet {
        Snippet {
            title: Some(Annotation {
                annotation_type: self.annotation_type,
                id: self.id.as_deref(),
                label: Some(&self.title),
            }),
            slices: self.slices.iter().map(SliceOwned::as_slice).collect(),
            footer: self
                .footer
                .iter()
                .map(AnnotationOwned::as_annotation)
                .collect(),
            opt: FormatOptions {
                color: super::COLORED,
                ..Default::default()
            },
        }
    }
}

impl SliceOwned<'_> {
    pub fn as_slice(&self) -> Slice {
        Slice {
            source: self.source,
            line_start: 1,
            annotations: self
                .annotations
                .iter()
                .map(|ann| ann.as_source_annotation(self.source))
                .collect(),
            origin: self.origin,
            fold: true,
        }
    }
}

impl AnnotationOwned<'_> {
    pub fn as_annotation(&self) -> Annotation {
        Annotation {
            annotation_type: self.annotation_type,
            id: self.id.as_deref(),
            label: self.label.as_deref(),
        }
    }
}

impl SourceAnnotationOwned {
    pub fn as_source_annotation<'a>(&'a self, source: &str) -> SourceAnnotation<'a> {
        SourceAnnotation {
            range: self.range.char_bounds(source),
            label: &self.label,
            annotation_type: self.annotation_type,
        }
    }
}

/// Groups source annotations by the file they point into.
///
/// Empty spans (synthesized trees) and spans that are not covered by any input file
/// are silently dropped, the diagnostic then only consists of its title.
pub(crate) struct SliceBuilder<'a> {
    ctx: &'a CompileContext,
    slices: Vec<SliceOwned<'a>>,
}

impl<'a> SliceBuilder<'a> {
    pub fn new(ctx: &'a CompileContext) -> Self {
        SliceBuilder {
            ctx,
            slices: Vec::new(),
        }
    }

    pub fn annotate(&mut self, span: Span, annotation_type: AnnotationType, label: String) {
        if span.is_empty() {
            return;
        }
        let Some(code) = self.ctx.input_files.find_span_code(span) else {
            return;
        };
        let annotation = SourceAnnotationOwned {
            annotation_type,
            range: code.get_relative_span(span),
            label,
        };

        if let Some(slice) = self
            .slices
            .iter_mut()
            .find(|slice| slice.code_id == code.id())
        {
            slice.annotations.push(annotation);
        } else {
            let file = code.get_code();
            self.slices.push(SliceOwned {
                code_id: code.id(),
                source: &file.source,
                origin: file.path.as_deref(),
                annotations: vec![annotation],
            });
        }
    }

    pub fn finish(self) -> Vec<SliceOwned<'a>> {
        self.slices
    }
}
