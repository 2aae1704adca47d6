//! Identifiers that must never be renamed.
//!
//! The built-in list covers what a script can reach without declaring it:
//! reserved words, host globals, and the properties and methods of the
//! standard and DOM objects. Member names go through the renamer like any
//! other identifier, so `el.appendChild` only survives because
//! `appendChild` is listed here.

use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::Path;

use crate::error::{Error, Result};

/// Names no script may rename.
#[rustfmt::skip]
pub const SYSTEM_BLACKLIST: &[&str] = &[
    // Reserved words and literals
    "break", "case", "catch", "continue", "default", "delete", "do", "else",
    "finally", "for", "function", "if", "in", "instanceof", "new", "return",
    "switch", "this", "throw", "try", "typeof", "var", "void", "while", "with",
    "null", "true", "false", "abstract", "boolean", "byte", "char", "class",
    "const", "debugger", "double", "enum", "export", "extends", "final",
    "float", "goto", "implements", "import", "int", "interface", "long",
    "native", "package", "private", "protected", "public", "short", "static",
    "super", "synchronized", "throws", "transient", "volatile", "let", "yield",
    // Global values and functions
    "undefined", "NaN", "Infinity", "arguments", "eval", "isFinite", "isNaN",
    "parseFloat", "parseInt", "decodeURI", "decodeURIComponent", "encodeURI",
    "encodeURIComponent", "escape", "unescape",
    // Constructors and namespaces
    "Object", "Function", "Array", "String", "Boolean", "Number", "Date",
    "RegExp", "Error", "EvalError", "RangeError", "ReferenceError",
    "SyntaxError", "TypeError", "URIError", "Math", "JSON",
    // Object
    "constructor", "prototype", "hasOwnProperty", "isPrototypeOf",
    "propertyIsEnumerable", "toLocaleString", "toString", "valueOf",
    "__proto__", "__defineGetter__", "__defineSetter__", "__lookupGetter__",
    "__lookupSetter__",
    // Function
    "apply", "call", "length", "caller", "callee", "name",
    // Array
    "concat", "join", "pop", "push", "reverse", "shift", "slice", "sort",
    "splice", "unshift", "indexOf", "lastIndexOf", "every", "some", "forEach",
    "map", "filter", "reduce", "reduceRight",
    // String
    "charAt", "charCodeAt", "fromCharCode", "localeCompare", "match",
    "replace", "search", "split", "substr", "substring", "toLowerCase",
    "toUpperCase", "toLocaleLowerCase", "toLocaleUpperCase", "trim", "anchor",
    "big", "blink", "bold", "fixed", "fontcolor", "fontsize", "italics",
    "link", "small", "strike", "sub", "sup",
    // Number
    "toFixed", "toExponential", "toPrecision", "MAX_VALUE", "MIN_VALUE",
    "NEGATIVE_INFINITY", "POSITIVE_INFINITY",
    // Math
    "E", "LN10", "LN2", "LOG10E", "LOG2E", "PI", "SQRT1_2", "SQRT2", "abs",
    "acos", "asin", "atan", "atan2", "ceil", "cos", "exp", "floor", "log",
    "max", "min", "pow", "random", "round", "sin", "sqrt", "tan",
    // Date
    "UTC", "parse", "now", "getDate", "getDay", "getFullYear", "getHours",
    "getMilliseconds", "getMinutes", "getMonth", "getSeconds", "getTime",
    "getTimezoneOffset", "getUTCDate", "getUTCDay", "getUTCFullYear",
    "getUTCHours", "getUTCMilliseconds", "getUTCMinutes", "getUTCMonth",
    "getUTCSeconds", "getYear", "setDate", "setFullYear", "setHours",
    "setMilliseconds", "setMinutes", "setMonth", "setSeconds", "setTime",
    "setUTCDate", "setUTCFullYear", "setUTCHours", "setUTCMilliseconds",
    "setUTCMinutes", "setUTCMonth", "setUTCSeconds", "setYear",
    "toDateString", "toTimeString", "toLocaleDateString",
    "toLocaleTimeString", "toUTCString", "toGMTString", "toISOString",
    "toJSON",
    // RegExp
    "exec", "test", "compile", "source", "global", "ignoreCase", "multiline",
    "lastIndex", "index", "input", "lastMatch", "lastParen", "leftContext",
    "rightContext",
    // Error
    "message", "stack", "fileName", "lineNumber",
    // JSON
    "stringify",
    // Host globals
    "window", "self", "top", "parent", "opener", "frames", "document",
    "navigator", "location", "history", "screen", "console", "alert",
    "confirm", "prompt", "print", "open", "close", "focus", "blur",
    "setTimeout", "clearTimeout", "setInterval", "clearInterval",
    "XMLHttpRequest", "ActiveXObject", "Image", "Option", "Event", "Node",
    "Element", "HTMLElement", "localStorage", "sessionStorage", "frameElement",
    "innerWidth", "innerHeight", "outerWidth", "outerHeight", "pageXOffset",
    "pageYOffset", "scrollX", "scrollY", "scrollTo", "scrollBy", "status",
    "defaultStatus", "closed", "getComputedStyle", "event",
    // Navigator, location, screen, console
    "userAgent", "appName", "appVersion", "platform", "language",
    "cookieEnabled", "onLine", "href", "protocol", "host", "hostname", "port",
    "pathname", "hash", "assign", "reload", "back", "forward", "go", "width",
    "height", "availWidth", "availHeight", "colorDepth", "info", "warn",
    "error", "debug", "dir", "trace",
    // Document
    "body", "head", "documentElement", "title", "cookie", "domain",
    "referrer", "URL", "forms", "images", "links", "anchors", "scripts",
    "styleSheets", "readyState", "createElement", "createTextNode",
    "createDocumentFragment", "createComment", "createEvent",
    "getElementById", "getElementsByTagName", "getElementsByName",
    "getElementsByClassName", "querySelector", "querySelectorAll", "write",
    "writeln", "execCommand", "activeElement", "defaultView", "elementFromPoint",
    // Node and element
    "nodeName", "nodeType", "nodeValue", "parentNode", "childNodes",
    "firstChild", "lastChild", "previousSibling", "nextSibling",
    "ownerDocument", "attributes", "appendChild", "removeChild",
    "replaceChild", "insertBefore", "cloneNode", "hasChildNodes", "normalize",
    "tagName", "id", "className", "innerHTML", "outerHTML", "innerText",
    "textContent", "style", "getAttribute", "setAttribute", "removeAttribute",
    "hasAttribute", "offsetWidth", "offsetHeight", "offsetLeft", "offsetTop",
    "offsetParent", "clientWidth", "clientHeight", "clientLeft", "clientTop",
    "scrollWidth", "scrollHeight", "scrollLeft", "scrollTop", "children",
    "click", "data", "value", "checked", "disabled", "selected",
    "selectedIndex", "options", "elements", "form", "action", "method",
    "target", "type", "src", "alt", "rel", "submit", "reset", "select",
    "rows", "cells", "insertRow", "deleteRow", "insertCell", "deleteCell",
    "tBodies", "rowIndex", "cellIndex", "text",
    // Style
    "display", "visibility", "position", "left", "top", "right", "bottom",
    "zIndex", "color", "background", "backgroundColor", "border", "margin",
    "padding", "overflow", "opacity", "filter", "cursor", "cssText",
    "cssFloat", "styleFloat", "fontSize", "fontWeight", "fontFamily",
    "textAlign",
    // Events
    "addEventListener", "removeEventListener", "dispatchEvent", "attachEvent",
    "detachEvent", "fireEvent", "preventDefault", "stopPropagation",
    "returnValue", "cancelBubble", "srcElement", "currentTarget",
    "relatedTarget", "fromElement", "toElement", "keyCode", "charCode",
    "which", "button", "clientX", "clientY", "pageX", "pageY", "screenX",
    "screenY", "altKey", "ctrlKey", "shiftKey", "metaKey", "onload",
    "onunload", "onclick", "ondblclick", "onmousedown", "onmouseup",
    "onmouseover", "onmouseout", "onmousemove", "onkeydown", "onkeyup",
    "onkeypress", "onchange", "onsubmit", "onreset", "onfocus", "onblur",
    "onresize", "onscroll", "onerror", "onreadystatechange",
    // XMLHttpRequest
    "send", "abort", "setRequestHeader", "getResponseHeader",
    "getAllResponseHeaders", "responseText", "responseXML", "statusText",
];

/// A sorted set of identifiers exempt from renaming.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist {
    names: BTreeSet<String>,
}

impl Blacklist {
    /// An empty blacklist.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in [`SYSTEM_BLACKLIST`].
    pub fn builtin() -> Self {
        SYSTEM_BLACKLIST.iter().copied().collect()
    }

    /// Merge whitespace-separated identifiers from `text`.
    ///
    /// Returns how many names were new.
    pub fn extend_from_text(&mut self, text: &str) -> usize {
        text.split_whitespace()
            .filter(|name| self.insert(name))
            .count()
    }

    /// Merge the identifiers listed in the file at `path`.
    pub fn load(&mut self, path: &Path) -> Result<usize> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::BlacklistRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.extend_from_text(&text))
    }

    /// Add one identifier. Returns `false` if it was already listed.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.names.contains(name) {
            return false;
        }
        self.names.insert(name.to_string())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Write one identifier per line, sorted.
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        for name in &self.names {
            writeln!(out, "{name}")?;
        }
        out.flush()
    }
}

impl<'a> FromIterator<&'a str> for Blacklist {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(str::to_string).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_reserved_words_and_host_names() {
        let list = Blacklist::builtin();
        for name in ["var", "function", "undefined", "document", "length", "push"] {
            assert!(list.contains(name), "{name} should be blacklisted");
        }
        assert!(!list.contains("foo"));
    }

    #[test]
    fn test_extend_from_text_splits_on_any_whitespace() {
        let mut list = Blacklist::new();
        let added = list.extend_from_text("alpha beta\n\tgamma  alpha\r\n");
        assert_eq!(added, 3);
        assert_eq!(list.iter().collect::<Vec<_>>(), ["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut list = Blacklist::new();
        let err = list.load(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, Error::BlacklistRead { .. }));
        assert!(list.is_empty());
    }

    #[test]
    fn test_load_merges() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.txt");
        std::fs::write(&path, "jQuery $ push\n").unwrap();

        let mut list = Blacklist::builtin();
        let before = list.len();
        assert_eq!(list.load(&path).unwrap(), 2);
        assert_eq!(list.len(), before + 2);
        assert!(list.contains("jQuery"));
    }

    #[test]
    fn test_write_to_is_sorted() {
        let list: Blacklist = ["zeta", "alpha", "Mid"].into_iter().collect();
        let mut out = Vec::new();
        list.write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Mid\nalpha\nzeta\n");
    }
}
