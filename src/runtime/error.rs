
use std::{ error::Error,
           process::Termination,
           fmt::{ self, Debug, Display, Formatter }, process::ExitCode };
use crate::{ runtime::interpreter::CallStack,
             lang::source_buffer::SourceLocation };

use super::interpreter::Interpreter;



pub type Result<T> = std::result::Result<T, ScriptError>;



/// Any error that occurs while loading word definitions or evaluating a line of input.
#[derive(Clone)]
pub struct ScriptError
{
    /// The location in the source the error occurred, if available.
    location: Option<SourceLocation>,

    /// The description of the error.
    error: String,

    /// The word expansion call stack at the time of the error, if available.
    call_stack: Option<CallStack>
}


impl Error for ScriptError
{
}


/// When returned from main, convert the error result to an operating system exit code.
impl Termination for ScriptError
{
    /// Because this type represents an error, the exit code is always FAILURE.
    fn report(self) -> ExitCode
    {
        eprintln!("Error: {}", self);
        ExitCode::FAILURE
    }
}


/// Pretty print the ScriptError, including the chain of words that were being expanded when the
/// error was raised.
impl Display for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        match &self.location
        {
            Some(location) => write!(f, "{}: {}", location, self.error)?,
            None => write!(f, "{}", self.error)?
        }

        if let Some(call_stack) = &self.call_stack
            && !call_stack.is_empty()
        {
            write!(f, "\n\nCall stack\n")?;

            for item in call_stack.iter().rev()
            {
                writeln!(f, "  {}", item)?;
            }
        }

        Ok(())
    }
}


impl Debug for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "{}", self)
    }
}


impl ScriptError
{
    /// Create a new ScriptError.
    pub fn new(location: Option<SourceLocation>,
               error: String,
               call_stack: Option<CallStack>) -> ScriptError
    {
        ScriptError
            {
                location,
                error,
                call_stack
            }
    }

    /// Create a new Script Error and wrap it in a Result::Err.
    pub fn new_as_result<T>(location: Option<SourceLocation>,
                            error: String,
                            call_stack: Option<CallStack>) -> Result<T>
    {
        Err(ScriptError::new(location, error, call_stack))
    }

    /// If available, the location in the source the error occurred.
    pub fn location(&self) -> &Option<SourceLocation>
    {
        &self.location
    }

    /// The description of the error.
    pub fn error(&self) -> &String
    {
        &self.error
    }

    /// If available, the word expansion call stack at the time of the error.
    pub fn call_stack(&self) -> &Option<CallStack>
    {
        &self.call_stack
    }
}


/// Allow for the conversion of a std::io::Error into a ScriptError.
impl From<std::io::Error> for ScriptError
{
    fn from(error: std::io::Error) -> ScriptError
    {
        ScriptError::new(None, format!("I/O error: {}", error), None)
    }
}



/// A convenience function for creating a ScriptError and wrapping in in a Result::Err using the
/// interpreter's current location and call stack.
pub fn script_error<T>(interpreter: &dyn Interpreter, message: String) -> Result<T>
{
    let location = interpreter.current_location().clone();
    let call_stack = interpreter.call_stack().clone();

    ScriptError::new_as_result(location, message, Some(call_stack))
}
