mod input_coercer_tests;
