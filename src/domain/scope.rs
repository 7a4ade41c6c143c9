//! Lexical scope tracking for definition and call scans.

/// One enclosing class or function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub name: String,
    pub is_class: bool,
}

/// Stack of enclosing class/function names at a traversal point.
///
/// Frames are only pushed through [`ScopeStack::with_frame`], which pops the
/// frame again once the nested traversal returns.
#[derive(Debug, Default)]
pub struct ScopeStack {
    frames: Vec<Frame>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with `name` pushed as the innermost frame.
    pub fn with_frame<R>(
        &mut self,
        name: &str,
        is_class: bool,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.frames.push(Frame {
            name: name.to_string(),
            is_class,
        });
        let result = f(self);
        self.frames.pop();
        result
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// True when the innermost open frame is a class body.
    pub fn in_class_body(&self) -> bool {
        self.frames.last().is_some_and(|f| f.is_class)
    }

    /// Dotted path of the open frames, e.g. `Outer.method`.
    pub fn path(&self) -> String {
        join(&self.frames)
    }

    /// Dotted path of every frame except the innermost one.
    pub fn parent_path(&self) -> Option<String> {
        match self.frames.len() {
            0 => None,
            n => Some(join(&self.frames[..n - 1])),
        }
    }

    /// Qualified id of a definition named `name` declared at this point.
    pub fn qualify(&self, module: &str, name: &str) -> String {
        if self.frames.is_empty() {
            format!("{}.{}", module, name)
        } else {
            format!("{}.{}.{}", module, self.path(), name)
        }
    }

    /// Qualified id of the calling context, `None` at module level.
    pub fn context_id(&self, module: &str) -> Option<String> {
        if self.frames.is_empty() {
            None
        } else {
            Some(format!("{}.{}", module, self.path()))
        }
    }
}

fn join(frames: &[Frame]) -> String {
    frames
        .iter()
        .map(|f| f.name.as_str())
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_pop_after_closure() {
        let mut scope = ScopeStack::new();
        scope.with_frame("Cls", true, |s| {
            assert!(s.in_class_body());
            s.with_frame("method", false, |s| {
                assert!(!s.in_class_body());
                assert_eq!(s.path(), "Cls.method");
                assert_eq!(s.parent_path().as_deref(), Some("Cls"));
            });
            assert_eq!(s.depth(), 1);
        });
        assert!(scope.is_empty());
    }

    #[test]
    fn test_qualify_top_level_and_nested() {
        let mut scope = ScopeStack::new();
        assert_eq!(scope.qualify("m", "f"), "m.f");
        assert_eq!(scope.context_id("m"), None);
        scope.with_frame("Cls", true, |s| {
            s.with_frame("run", false, |s| {
                assert_eq!(s.qualify("m", "inner"), "m.Cls.run.inner");
                assert_eq!(s.context_id("m").as_deref(), Some("m.Cls.run"));
            });
        });
    }
}
