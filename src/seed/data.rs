//! Built-in sample catalogue: five lessons, one quiz per lesson.

pub struct SampleLesson {
    pub title: &'static str,
    pub description: &'static str,
    pub content: &'static str,
    pub category: &'static str,
    pub order: u32,
}

pub struct SampleQuestion {
    pub text: &'static str,
    pub options: [&'static str; 4],
    pub correct: u32,
}

pub struct SampleQuiz {
    pub title: &'static str,
    /// Matched case-insensitively against existing lesson titles.
    pub lesson_title: &'static str,
    pub passing_score: u32,
    pub is_active: bool,
    pub questions: &'static [SampleQuestion],
}

pub const LESSONS: &[SampleLesson] = &[
    SampleLesson {
        title: "Introduction to JavaScript",
        description: "Learn the fundamentals of JavaScript programming language",
        content: "JavaScript is a versatile programming language used for web development. \
                  In this lesson, we'll cover variables, data types, functions, and basic syntax.",
        category: "Programming",
        order: 1,
    },
    SampleLesson {
        title: "HTML & CSS Basics",
        description: "Master the building blocks of web pages",
        content: "HTML provides structure while CSS adds styling. Learn how to create \
                  beautiful, responsive web pages from scratch.",
        category: "Web Development",
        order: 2,
    },
    SampleLesson {
        title: "React Fundamentals",
        description: "Build modern web applications with React",
        content: "React is a powerful JavaScript library for building user interfaces. \
                  Learn components, props, state, and hooks.",
        category: "Frontend",
        order: 3,
    },
    SampleLesson {
        title: "Node.js Backend Development",
        description: "Create server-side applications with Node.js",
        content: "Learn how to build RESTful APIs, handle databases, and create scalable \
                  backend services using Node.js and Express.",
        category: "Backend",
        order: 4,
    },
    SampleLesson {
        title: "Database Design with MongoDB",
        description: "Master NoSQL database concepts",
        content: "MongoDB is a flexible NoSQL database. Learn schema design, queries, \
                  aggregation, and best practices.",
        category: "Database",
        order: 5,
    },
];

pub const QUIZZES: &[SampleQuiz] = &[
    SampleQuiz {
        title: "JavaScript Basics Quiz",
        lesson_title: "Introduction to JavaScript",
        passing_score: 70,
        is_active: true,
        questions: &[
            SampleQuestion {
                text: "What is the correct way to declare a variable in JavaScript?",
                options: ["var x = 5;", "variable x = 5;", "int x = 5;", "x := 5;"],
                correct: 0,
            },
            SampleQuestion {
                text: "Which of the following is NOT a JavaScript data type?",
                options: ["String", "Boolean", "Float", "Undefined"],
                correct: 2,
            },
            SampleQuestion {
                text: "What does '===' operator do in JavaScript?",
                options: [
                    "Assignment",
                    "Comparison without type checking",
                    "Strict equality comparison",
                    "Not equal",
                ],
                correct: 2,
            },
        ],
    },
    SampleQuiz {
        title: "HTML & CSS Assessment",
        lesson_title: "HTML & CSS Basics",
        passing_score: 75,
        is_active: true,
        questions: &[
            SampleQuestion {
                text: "What does HTML stand for?",
                options: [
                    "Hyper Text Markup Language",
                    "High Tech Modern Language",
                    "Home Tool Markup Language",
                    "Hyperlinks and Text Markup Language",
                ],
                correct: 0,
            },
            SampleQuestion {
                text: "Which CSS property is used to change text color?",
                options: ["text-color", "font-color", "color", "text-style"],
                correct: 2,
            },
            SampleQuestion {
                text: "What is the correct HTML element for the largest heading?",
                options: ["<heading>", "<h6>", "<h1>", "<head>"],
                correct: 2,
            },
            SampleQuestion {
                text: "How do you make text bold in CSS?",
                options: [
                    "font-weight: bold;",
                    "text-style: bold;",
                    "font: bold;",
                    "text-weight: bold;",
                ],
                correct: 0,
            },
        ],
    },
    SampleQuiz {
        title: "React Components Quiz",
        lesson_title: "React Fundamentals",
        passing_score: 70,
        is_active: true,
        questions: &[
            SampleQuestion {
                text: "What is a React component?",
                options: [
                    "A JavaScript function or class",
                    "An HTML element",
                    "A CSS style",
                    "A database table",
                ],
                correct: 0,
            },
            SampleQuestion {
                text: "Which hook is used for side effects in React?",
                options: ["useState", "useEffect", "useContext", "useReducer"],
                correct: 1,
            },
            SampleQuestion {
                text: "What is JSX?",
                options: [
                    "A JavaScript extension",
                    "A CSS framework",
                    "A database query language",
                    "A testing library",
                ],
                correct: 0,
            },
        ],
    },
    SampleQuiz {
        title: "Node.js Fundamentals Test",
        lesson_title: "Node.js Backend Development",
        passing_score: 75,
        is_active: true,
        questions: &[
            SampleQuestion {
                text: "What is Node.js?",
                options: [
                    "A JavaScript runtime",
                    "A database",
                    "A frontend framework",
                    "A CSS preprocessor",
                ],
                correct: 0,
            },
            SampleQuestion {
                text: "Which module is used to create a web server in Node.js?",
                options: ["fs", "http", "path", "url"],
                correct: 1,
            },
            SampleQuestion {
                text: "What does npm stand for?",
                options: [
                    "Node Package Manager",
                    "New Programming Method",
                    "Network Protocol Manager",
                    "Node Program Module",
                ],
                correct: 0,
            },
            SampleQuestion {
                text: "Which method is used to read files asynchronously in Node.js?",
                options: ["fs.readFileSync()", "fs.readFile()", "fs.read()", "fs.openFile()"],
                correct: 1,
            },
        ],
    },
    SampleQuiz {
        title: "MongoDB Essentials Quiz",
        lesson_title: "Database Design with MongoDB",
        passing_score: 70,
        is_active: true,
        questions: &[
            SampleQuestion {
                text: "What type of database is MongoDB?",
                options: ["Relational", "NoSQL", "Graph", "Key-Value"],
                correct: 1,
            },
            SampleQuestion {
                text: "What is a collection in MongoDB?",
                options: [
                    "A group of databases",
                    "A group of documents",
                    "A single record",
                    "A query result",
                ],
                correct: 1,
            },
            SampleQuestion {
                text: "Which method is used to insert a document in MongoDB?",
                options: ["insertOne()", "add()", "create()", "push()"],
                correct: 0,
            },
        ],
    },
];
