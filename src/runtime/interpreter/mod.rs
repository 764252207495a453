use crate::{
    lang::source_buffer::SourceLocation,
    runtime::{
        data_structures::{
            dictionary::{Dictionary, WordInfo},
            stack::Stack,
        },
        error,
    },
};
use std::{
    fmt::{self, Display, Formatter},
    rc::Rc,
};

pub mod clac_interpreter;

/// A call stack item is a record of a user word being expanded and the location it was defined at.
/// These items are read-only and the fields are accessed by member functions.
#[derive(Clone)]
pub struct CallItem {
    location: SourceLocation,
    word: String,
}

impl CallItem {
    /// Create a new call stack item.
    pub fn new(word: String, location: SourceLocation) -> CallItem {
        CallItem { location, word }
    }

    /// Where the word being expanded was defined.
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    // The name of the word being expanded.
    pub fn word(&self) -> &String {
        &self.word
    }
}

/// Make sure that this item can be nicely displayed to the user in event of an error.
impl Display for CallItem {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.word)
    }
}

/// Type to represent a call stack.  This is the chain of user words currently being expanded, and
/// its depth is what limits runaway recursion.
pub type CallStack = Vec<CallItem>;

/// Trait for reaching the calculator's two stacks.  Intended to be called by the built-in words.
///
/// None of these operations fail.  Popping an empty stack reads as `0.0` and pushing onto a full
/// stack drops the value with a warning, so a half typed line never stops evaluation.
pub trait InterpreterStack {
    /// The primary stack, the one the user sees and does arithmetic on.
    fn stack(&self) -> &Stack;

    /// The stash stack, where values can be parked out of the way.
    fn stash(&self) -> &Stack;

    /// Both stacks at once, primary first, for words that move values between them.
    fn stacks_mut(&mut self) -> (&mut Stack, &mut Stack);

    /// Push a value onto the primary stack.
    fn push(&mut self, value: f64);

    /// Pop a value from the primary stack, `0.0` if it is empty.
    fn pop(&mut self) -> f64;

    /// Read the top of the primary stack without removing it, `0.0` if it is empty.
    fn peek(&self) -> f64;

    /// How many values are on the primary stack?
    fn depth(&self) -> usize {
        self.stack().len()
    }

    /// The top of the primary stack as it was when the last line was committed.
    fn hole(&self) -> f64;
}

/// Definition of a word handler function.  This is the function that is called when a built-in word
/// is executed.  Can be a lambda, a callable object or a Rust function.
pub type WordHandler = dyn Fn(&mut dyn Interpreter) -> error::Result<()>;

/// Information about a built-in word.  Once created it's fields are read-only and accessed by member
/// methods.
#[derive(Clone)]
pub struct WordHandlerInfo {
    name: String,
    description: String,
    signature: String,
    handler: Rc<WordHandler>,
}

impl WordHandlerInfo {
    /// Create a new WordHandlerInfo instance.
    pub fn new(
        name: String,
        description: String,
        signature: String,
        handler: Rc<WordHandler>,
    ) -> WordHandlerInfo {
        WordHandlerInfo {
            name,
            description,
            signature,
            handler,
        }
    }

    /// The name of the word itself.
    pub fn name(&self) -> &String {
        &self.name
    }

    /// A simple description of what the word does.
    pub fn description(&self) -> &String {
        &self.description
    }

    /// The word's stack signature.
    pub fn signature(&self) -> &String {
        &self.signature
    }

    /// The handler function for the word.
    pub fn handler(&self) -> Rc<WordHandler> {
        self.handler.clone()
    }
}

/// Simplify registering a built-in word with the interpreter.
///
/// Required parameters are, the interpreter instance to register with.  The name of the word to
/// register.  The word function handler to execute for the word.  A simple description of the word.
/// As well as the word's stack signature.
#[macro_export]
macro_rules! add_native_word {
    (
        $interpreter:expr ,
        $name:expr ,
        $function:expr ,
        $description:expr ,
        $signature:expr
    ) => {{
        use std::rc::Rc;

        $interpreter.add_builtin(
            $name.to_string(),
            Rc::new($function),
            $description.to_string(),
            $signature.to_string(),
        );
    }};
}

/// Trait for managing and executing the words known to the interpreter, both built-in and user
/// defined.
pub trait WordManagement {
    /// If currently set, the location of the text being evaluated.  While a user word is being
    /// expanded this is where that word was defined.
    fn current_location(&self) -> &Option<SourceLocation>;

    /// Add a new built-in word.  Built-in names are matched without regard to case.
    fn add_builtin(
        &mut self,
        name: String,
        handler: Rc<WordHandler>,
        description: String,
        signature: String,
    );

    /// Find a built-in word by name.
    fn find_builtin(&self, name: &str) -> Option<&WordHandlerInfo>;

    /// The built-in words, sorted by name.
    fn builtins(&self) -> Vec<&WordHandlerInfo>;

    /// Define or redefine a user word.  Redefinition replaces the meaning and logs a warning.
    fn define_word(&mut self, location: SourceLocation, name: String, meaning: String);

    /// Find a user word by name.
    fn find_word(&self, name: &str) -> Option<&WordInfo>;

    /// The dictionary of user words.
    fn dictionary(&self) -> &Dictionary;

    /// Forget all user words.
    fn clear_words(&mut self);

    /// Execute a built-in word.
    fn execute_builtin(&mut self, word_handler_info: &WordHandlerInfo) -> error::Result<()>;

    /// Expand a user word by evaluating its meaning.  Fails if the chain of expansions has become
    /// too deep.
    fn execute_word(&mut self, word: &WordInfo) -> error::Result<()>;

    /// The chain of user words currently being expanded.
    fn call_stack(&self) -> &CallStack;
}

/// Core interpreter trait.
///
/// This trait brings together the stacks and the words, and adds evaluation of text.  Evaluation
/// is the same single path whether the text came from the command line, a committed REPL line, the
/// live preview or the meaning of a user word.
pub trait Interpreter: InterpreterStack + WordManagement {
    /// Split the text into tokens and process each one in order.  Text with unbalanced quotes holds
    /// no tokens.
    fn evaluate(&mut self, source: &str) -> error::Result<()>;

    /// Process a single token: a built-in word, a user word, a number, or something unknown.
    fn process_token(&mut self, token: &str) -> error::Result<()>;

    /// Clear both stacks and evaluate the text, without touching the hole or the dictionary.
    /// Running the same preview any number of times gives the same stacks.
    fn preview(&mut self, source: &str) -> error::Result<()>;

    /// Clear both stacks and evaluate a committed line.  A non-blank line also records the top of
    /// the primary stack as the new hole.
    fn commit(&mut self, source: &str) -> error::Result<()>;

    /// Empty both stacks.
    fn reset(&mut self);
}
