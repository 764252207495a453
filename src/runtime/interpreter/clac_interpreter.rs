use std::{ collections::HashMap,
           rc::Rc };
use crate::{ lang::{ source_buffer::{ INPUT_PATH,
                                      SourceLocation },
                     tokenizing::{ parse_number,
                                   split_args },
                     word_source::{ load_definitions,
                                    Definition } },
             runtime::{ built_ins::register_builtin_words,
                        data_structures::{ dictionary::{ Dictionary,
                                                         WordInfo },
                                           stack::Stack },
                        error::{ self,
                                 script_error },
                        interpreter::{ CallItem,
                                       CallStack,
                                       Interpreter,
                                       InterpreterStack,
                                       WordHandler,
                                       WordHandlerInfo,
                                       WordManagement } } };



/// How deep user words may nest inside of each other before expansion is abandoned.  A word that
/// refers to itself, directly or through other words, hits this limit instead of exhausting the
/// process stack.
pub const MAX_CALL_DEPTH: usize = 256;

/// The built-in words known by the interpreter, keyed by lower case name.
pub type BuiltinList = HashMap<String, WordHandlerInfo>;



/// A calculator session.  It owns the primary and stash stacks, the hole holding the last committed
/// answer, the built-in words and the dictionary of user words.
pub struct ClacInterpreter
{
    /// The stack the user works with.
    primary: Stack,

    /// The stack values are stashed on, also used as scratch space when rolling the primary stack.
    stash: Stack,

    /// The top of the primary stack from the last committed line, recalled with `_`.
    hole: f64,


    /// The location of the text currently being evaluated.
    current_location: Option<SourceLocation>,

    /// The chain of user words being expanded.
    call_stack: CallStack,


    /// The words implemented in Rust.
    builtins: BuiltinList,

    /// The words defined by the user.
    dictionary: Dictionary
}


impl InterpreterStack for ClacInterpreter
{
    fn stack(&self) -> &Stack
    {
        &self.primary
    }

    fn stash(&self) -> &Stack
    {
        &self.stash
    }

    fn stacks_mut(&mut self) -> (&mut Stack, &mut Stack)
    {
        (&mut self.primary, &mut self.stash)
    }

    fn push(&mut self, value: f64)
    {
        self.primary.push(value);
    }

    fn pop(&mut self) -> f64
    {
        self.primary.pop()
    }

    fn peek(&self) -> f64
    {
        self.primary.peek()
    }

    fn hole(&self) -> f64
    {
        self.hole
    }
}


impl WordManagement for ClacInterpreter
{
    fn current_location(&self) -> &Option<SourceLocation>
    {
        &self.current_location
    }

    fn add_builtin(&mut self,
                   name: String,
                   handler: Rc<WordHandler>,
                   description: String,
                   signature: String)
    {
        let info = WordHandlerInfo::new(name.clone(), description, signature, handler);

        let _ = self.builtins.insert(name.to_ascii_lowercase(), info);
    }

    fn find_builtin(&self, name: &str) -> Option<&WordHandlerInfo>
    {
        self.builtins.get(&name.to_ascii_lowercase())
    }

    fn builtins(&self) -> Vec<&WordHandlerInfo>
    {
        let mut builtins: Vec<&WordHandlerInfo> = self.builtins.values().collect();

        builtins.sort_by(|a, b| a.name().cmp(b.name()));
        builtins
    }

    fn define_word(&mut self, location: SourceLocation, name: String, meaning: String)
    {
        let info = WordInfo::new(location.clone(), name, meaning);

        if let Some(previous) = self.dictionary.define(info)
        {
            tracing::warn!("{}: Duplicate definition of word {}, first defined at {}.",
                           location,
                           previous.name,
                           previous.location);
        }
    }

    fn find_word(&self, name: &str) -> Option<&WordInfo>
    {
        self.dictionary.try_get(name)
    }

    fn dictionary(&self) -> &Dictionary
    {
        &self.dictionary
    }

    fn clear_words(&mut self)
    {
        self.dictionary.clear();
    }

    fn execute_builtin(&mut self, word_handler_info: &WordHandlerInfo) -> error::Result<()>
    {
        (*word_handler_info.handler())(self)
    }

    fn execute_word(&mut self, word: &WordInfo) -> error::Result<()>
    {
        if self.call_stack.len() >= MAX_CALL_DEPTH
        {
            return script_error(self, format!("Recursion limit of {} exceeded while expanding word \
                                               '{}'.",
                                              MAX_CALL_DEPTH,
                                              word.name));
        }

        let previous_location = self.current_location.replace(word.location.clone());
        self.call_stack.push(CallItem::new(word.name.clone(), word.location.clone()));

        let result = self.evaluate(&word.meaning);

        let _ = self.call_stack.pop();
        self.current_location = previous_location;

        result
    }

    fn call_stack(&self) -> &CallStack
    {
        &self.call_stack
    }
}


impl Interpreter for ClacInterpreter
{
    fn evaluate(&mut self, source: &str) -> error::Result<()>
    {
        let location = self.current_location
                           .clone()
                           .unwrap_or_else(|| SourceLocation::new_from_path(INPUT_PATH));

        let tokens = match split_args(&location, source)
            {
                Ok(tokens) => tokens,
                Err(error) =>
                    {
                        tracing::trace!(%error, "Nothing to evaluate.");
                        return Ok(());
                    }
            };

        for token in tokens.iter()
        {
            self.process_token(token)?;
        }

        Ok(())
    }

    fn process_token(&mut self, token: &str) -> error::Result<()>
    {
        if let Some(builtin) = self.find_builtin(token)
        {
            let builtin = builtin.clone();
            return self.execute_builtin(&builtin);
        }

        if let Some(word) = self.find_word(token)
        {
            let word = word.clone();
            return self.execute_word(&word);
        }

        if let Some(value) = parse_number(token)
        {
            self.push(value);
            return Ok(());
        }

        // Unknown names are skipped, anything else that failed to parse becomes a NaN so the
        // mistake stays visible in the result.
        match token.chars().next()
        {
            Some(first) if first.is_ascii_alphabetic() =>
                {
                    tracing::trace!(token, "Ignoring unknown word.");
                }

            _ => self.push(f64::NAN)
        }

        Ok(())
    }

    fn preview(&mut self, source: &str) -> error::Result<()>
    {
        self.reset();
        self.evaluate(source)
    }

    fn commit(&mut self, source: &str) -> error::Result<()>
    {
        self.reset();
        self.evaluate(source)?;

        if !source.trim().is_empty()
        {
            self.hole = self.peek();
        }

        Ok(())
    }

    fn reset(&mut self)
    {
        self.primary.clear();
        self.stash.clear();
    }
}


impl ClacInterpreter
{
    /// Create a new session with empty stacks and no words at all.
    pub fn new() -> ClacInterpreter
    {
        ClacInterpreter
            {
                primary: Stack::new(),
                stash: Stack::new(),
                hole: 0.0,

                current_location: None,
                call_stack: CallStack::with_capacity(16),

                builtins: BuiltinList::new(),
                dictionary: Dictionary::new()
            }
    }

    /// Create a new session with all of the built-in words registered.
    pub fn with_builtins() -> ClacInterpreter
    {
        let mut interpreter = ClacInterpreter::new();

        register_builtin_words(&mut interpreter);
        interpreter
    }

    /// Define each of the given words in order.  Later definitions of a name win.
    pub fn add_definitions(&mut self, definitions: Vec<Definition>)
    {
        for definition in definitions
        {
            self.define_word(definition.location, definition.name, definition.meaning);
        }
    }

    /// Load the user words from a word file.  A missing file defines nothing, a malformed one is an
    /// error.
    pub fn process_words_file(&mut self, path: &str) -> error::Result<()>
    {
        let definitions = load_definitions(path)?;

        tracing::debug!(path, count = definitions.len(), "Loaded word definitions.");

        self.add_definitions(definitions);
        Ok(())
    }

    /// Replace the user words with a fresh load of the word file.
    pub fn reload_words(&mut self, path: &str) -> error::Result<()>
    {
        let definitions = load_definitions(path)?;

        tracing::debug!(path, count = definitions.len(), "Reloading word definitions.");

        self.clear_words();
        self.add_definitions(definitions);

        Ok(())
    }
}


impl Default for ClacInterpreter
{
    fn default() -> Self
    {
        Self::new()
    }
}
