mod ordered;
