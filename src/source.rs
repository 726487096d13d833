use std::fs;
use std::io;
use std::rc::Rc;

#[derive(Debug)]
pub struct SourceImpl {
    pub name: String,
    pub content: String,
}

pub type Source = Rc<SourceImpl>;

pub fn file(path: &str) -> io::Result<Source> {
    let content = fs::read_to_string(path)?;
    Ok(Rc::new(SourceImpl {
        name: String::from(path),
        content,
    }))
}

pub fn text(text: &str) -> Source {
    named(text, "<text>")
}

pub fn named(text: &str, name: &str) -> Source {
    Rc::new(SourceImpl {
        name: String::from(name),
        content: String::from(text),
    })
}

impl SourceImpl {
    pub fn length(&self) -> usize {
        self.content.len()
    }

    /// The character starting at byte offset `index`, if any.
    pub fn character(&self, index: usize) -> Option<char> {
        self.content.get(index..).and_then(|rest| rest.chars().next())
    }

    pub fn lexeme(&self, index: usize, length: usize) -> &str {
        &self.content[index..(index + length)]
    }
}

#[derive(Clone, Debug)]
pub struct Span {
    pub source: Source,
    pub index: usize,
    pub length: usize,
    pub line: usize,
}

impl Span {
    pub fn new(source: &Source, index: usize, length: usize, line: usize) -> Self {
        Span {
            source: Rc::clone(source),
            index,
            length,
            line,
        }
    }

    pub fn empty() -> Self {
        Span::new(&text(""), 0, 0, 1)
    }

    /// A span covering the whole of a freshly made source holding `lexeme`.
    /// Nodes introduced by a transformation use these.
    pub fn synthetic(lexeme: &str) -> Self {
        let source = named(lexeme, "<synthetic>");
        Span::new(&source, 0, source.length(), 1)
    }

    pub fn join<T: ContainsSpan, U: ContainsSpan>(start: &T, end: &U) -> Self {
        let start = start.span();
        let end = end.span();
        if !Rc::ptr_eq(&start.source, &end.source) || end.index + end.length < start.index {
            return start.clone();
        }
        Span::new(
            &start.source,
            start.index,
            end.index + end.length - start.index,
            start.line,
        )
    }

    pub fn join_opt<T: ContainsSpan, U: ContainsSpan>(start: &T, end: &Option<U>) -> Self {
        match end {
            Some(end) => Span::join(start, end),
            None => start.span().clone(),
        }
    }

    pub fn lexeme(&self) -> &str {
        self.source.lexeme(self.index, self.length)
    }

    /// The full line containing the start of this span, and the column the
    /// span starts at within it.
    pub fn entire_line(&self) -> (&str, usize) {
        let content = &self.source.content;
        let start = content[..self.index].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let end = content[self.index..]
            .find('\n')
            .map(|i| self.index + i)
            .unwrap_or(content.len());
        (&content[start..end], content[start..self.index].chars().count())
    }

    pub fn location(&self) -> String {
        let (_, column) = self.entire_line();
        format!("{}:{}:{}", self.source.name, self.line, column + 1)
    }
}

pub trait ContainsSpan {
    fn span(&self) -> &Span;
}

impl ContainsSpan for Span {
    fn span(&self) -> &Span {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_covers_both_ends() {
        let source = text("var abc = 12;");
        let start = Span::new(&source, 0, 3, 1);
        let end = Span::new(&source, 10, 2, 1);
        let joined = Span::join(&start, &end);
        assert_eq!(joined.lexeme(), "var abc = 12");
    }

    #[test]
    fn location_reports_line_and_column() {
        let source = named("var a;\n  var b;", "demo.js");
        let span = Span::new(&source, 9, 3, 2);
        let (line, column) = span.entire_line();
        assert_eq!(line, "  var b;");
        assert_eq!(column, 2);
        assert_eq!(span.location(), "demo.js:2:3");
    }
}
