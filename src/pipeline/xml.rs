use crate::error::ParseError;
use quick_xml::events::Event;
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

/// One node of the parsed document. Names are namespace-resolved, so lookups
/// use (namespace URI, local name) and never depend on the prefixes a
/// particular device chose.
#[derive(Debug, Clone)]
pub struct Element {
    pub namespace: Option<String>,
    pub name: String,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    fn new(namespace: Option<String>, name: String) -> Self {
        Self {
            namespace,
            name,
            text: String::new(),
            children: Vec::new(),
        }
    }

    fn is(&self, namespace: &str, name: &str) -> bool {
        self.name == name && self.namespace.as_deref() == Some(namespace)
    }

    pub fn child(&self, namespace: &str, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.is(namespace, name))
    }

    pub fn children_named<'a>(
        &'a self,
        namespace: &'a str,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.is(namespace, name))
    }

    /// Walks a chain of child lookups: `find(&[(ns, "Extensions"), (ext, "LX")])`.
    pub fn find(&self, path: &[(&str, &str)]) -> Option<&Element> {
        path.iter()
            .try_fold(self, |el, (ns, name)| el.child(ns, name))
    }

    pub fn text(&self) -> &str {
        self.text.trim()
    }
}

/// Parses a raw byte buffer into an owned element tree. Fails only on
/// markup that is not well formed; schema deviations are the extractor's
/// concern.
pub fn load(bytes: &[u8]) -> Result<Element, ParseError> {
    let mut reader = NsReader::from_reader(bytes);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let (ns, local) = reader.resolve_element(e.name());
                stack.push(Element::new(namespace_uri(ns), local_name(local.as_ref())?));
            }
            Ok(Event::Empty(e)) => {
                let (ns, local) = reader.resolve_element(e.name());
                let element = Element::new(namespace_uri(ns), local_name(local.as_ref())?);
                attach(element, &mut stack, &mut root)?;
            }
            Ok(Event::Text(t)) => {
                if let Some(top) = stack.last_mut() {
                    let text = t
                        .unescape()
                        .map_err(|e| ParseError::MalformedDocument(e.to_string()))?;
                    top.text.push_str(&text);
                }
            }
            Ok(Event::CData(t)) => {
                if let Some(top) = stack.last_mut() {
                    let text = std::str::from_utf8(&t)
                        .map_err(|e| ParseError::MalformedDocument(e.to_string()))?;
                    top.text.push_str(text);
                }
            }
            Ok(Event::End(_)) => {
                // quick-xml checks start/end pairing for us, so the stack
                // cannot be empty here on a successful event.
                let element = stack
                    .pop()
                    .ok_or_else(|| ParseError::MalformedDocument("unexpected closing tag".into()))?;
                attach(element, &mut stack, &mut root)?;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::MalformedDocument(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(ParseError::MalformedDocument(
            "document ended with unclosed elements".into(),
        ));
    }

    root.ok_or_else(|| ParseError::MalformedDocument("document has no root element".into()))
}

fn attach(
    element: Element,
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
) -> Result<(), ParseError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            if root.is_some() {
                return Err(ParseError::MalformedDocument(
                    "document has more than one root element".into(),
                ));
            }
            *root = Some(element);
        }
    }
    Ok(())
}

fn namespace_uri(result: ResolveResult) -> Option<String> {
    match result {
        ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.into_inner()).into_owned()),
        _ => None,
    }
}

fn local_name(raw: &[u8]) -> Result<String, ParseError> {
    std::str::from_utf8(raw)
        .map(str::to_owned)
        .map_err(|e| ParseError::MalformedDocument(e.to_string()))
}
