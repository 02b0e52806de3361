#[cfg(test)]
pub const POST_DATA: &str = "# Syntax error in production
Last week a deploy failed because of a missing comma.
This post is about how we found it.

## What happened

The error looked like this:

```js
const answer = 42;
return answer;
```

> It was not obvious at first.

<img src=\"syntax-error.png\" alt=\"error\">

The fix was one character long.

![screenshot](syntax-error.png)

Lessons:

- Check the diff
- Read the error

Always run the linter before pushing.
";

#[cfg(test)]
pub const POST_DATA_UNTITLED: &str = "Notes from the week

Nothing big happened, just reading.
";
